use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::error::CatalogError;

const BUNDLED_CATALOG: &str = include_str!("../../data/challenges.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Array,
    String,
    Object,
    Algorithm,
    Utility,
    Math,
    Date,
    Dom,
    Async,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Array => "array",
            Category::String => "string",
            Category::Object => "object",
            Category::Algorithm => "algorithm",
            Category::Utility => "utility",
            Category::Math => "math",
            Category::Date => "date",
            Category::Dom => "dom",
            Category::Async => "async",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub code: String,
    pub answer: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub difficulty: Difficulty,
    pub category: Category,
}

impl Challenge {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.code.trim().is_empty() {
            return Err(CatalogError::EmptyCode { id: self.id });
        }
        if self.answer.trim().is_empty() {
            return Err(CatalogError::EmptyAnswer { id: self.id });
        }
        if !self.options.is_empty() && !self.options.contains(&self.answer) {
            return Err(CatalogError::AnswerNotInOptions { id: self.id });
        }
        Ok(())
    }
}

/// Immutable, non-empty, ordered list of challenges.
///
/// Position in the list is the identity used for daily selection; ids are
/// what the completion ledger records, so they must be unique.
#[derive(Debug, Clone)]
pub struct ChallengeCatalog {
    challenges: Vec<Challenge>,
}

impl ChallengeCatalog {
    pub fn new(challenges: Vec<Challenge>) -> Result<Self, CatalogError> {
        if challenges.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for challenge in &challenges {
            challenge.validate()?;
            if !seen.insert(challenge.id) {
                return Err(CatalogError::DuplicateId(challenge.id));
            }
        }

        Ok(Self { challenges })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let challenges: Vec<Challenge> = serde_json::from_str(json)?;
        Self::new(challenges)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn get(&self, index: usize) -> Option<&Challenge> {
        self.challenges.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_challenge(id: u32, lines: usize) -> Challenge {
    let code = (1..=lines)
        .map(|n| format!("line {}", n))
        .collect::<Vec<_>>()
        .join("\n");
    Challenge {
        id,
        code,
        answer: format!("answer {}", id),
        options: vec![
            format!("answer {}", id),
            "wrong one".to_string(),
            "wrong two".to_string(),
            "wrong three".to_string(),
        ],
        difficulty: Difficulty::Easy,
        category: Category::Array,
    }
}

#[cfg(test)]
pub(crate) fn sample_catalog(size: u32) -> ChallengeCatalog {
    ChallengeCatalog::new((1..=size).map(|id| sample_challenge(id, 8)).collect()).unwrap()
}
