pub const MAX_REVEAL_LEVEL: u32 = 5;

/// Returns the first `ceil(level / max * total_lines)` lines of `code`.
pub fn revealed_code(code: &str, reveal_level: u32, max_reveal_level: u32) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let max = max_reveal_level.max(1) as usize;
    let level = reveal_level.min(max_reveal_level) as usize;
    let lines_to_reveal = (level * lines.len()).div_ceil(max);

    lines[..lines_to_reveal].join("\n")
}

pub fn points_for_correct_guess(reveal_level: u32, max_reveal_level: u32) -> u32 {
    let steps_left = (max_reveal_level + 1).saturating_sub(reveal_level).max(1);
    steps_left * 10
}
