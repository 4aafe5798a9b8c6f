//! Static catalog of colleges and programs.
//!
//! The catalog is read from a YAML file once at process start and handed to
//! the resolver as an explicit handle; nothing in the crate reaches for it
//! through globals. Malformed entries are rejected here, at load time, so the
//! lookup paths never see them.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{College, Program};

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    colleges: HashMap<String, College>,
}

/// Read-only college/program hierarchy.
#[derive(Debug, Default)]
pub struct Catalog {
    colleges: HashMap<String, College>,
}

impl Catalog {
    /// Load and validate the catalog from a YAML file. An unreadable or
    /// unparseable file is a `Catalog*` error; a readable file with invalid
    /// entries is a `Config` error. A present-but-empty file yields an empty
    /// catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_yaml(&content)?;
        debug!(
            path = %path.display(),
            colleges = catalog.colleges.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawCatalog = serde_yaml::from_str(content)?;
        validate(&raw.colleges)?;
        Ok(Self {
            colleges: raw.colleges,
        })
    }

    /// Build a catalog directly from in-memory entries, skipping validation.
    /// Meant for test doubles; YAML loading always validates.
    pub fn from_colleges(colleges: HashMap<String, College>) -> Self {
        Self { colleges }
    }

    pub fn college(&self, college_id: &str) -> Result<&College> {
        self.colleges
            .get(college_id)
            .ok_or_else(|| Error::not_found(format!("college {college_id:?}")))
    }

    /// Find a program by tag within a college. Duplicate tags cannot come out
    /// of `from_yaml` (validation rejects them), but for hand-built catalogs
    /// the scan runs back-to-front so the last entry overrides earlier ones.
    pub fn program(&self, college_id: &str, tag: &str) -> Result<&Program> {
        self.college(college_id)?
            .programs
            .iter()
            .rev()
            .find(|program| program.tag == tag)
            .ok_or_else(|| Error::not_found(format!("program {tag:?} in college {college_id:?}")))
    }

    /// Flat view of every program, paired with its college id.
    pub fn programs(&self) -> impl Iterator<Item = (&str, &Program)> {
        self.colleges
            .iter()
            .flat_map(|(id, college)| college.programs.iter().map(move |p| (id.as_str(), p)))
    }

    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }
}

fn validate(colleges: &HashMap<String, College>) -> Result<()> {
    for (college_id, college) in colleges {
        if college_id.is_empty() {
            return Err(Error::config("college with empty id"));
        }
        let mut seen = HashMap::new();
        for program in &college.programs {
            if program.id.is_empty() || program.tag.is_empty() || program.name.is_empty() {
                return Err(Error::config(format!(
                    "college {college_id:?}: program entries need non-empty id, tag, and name"
                )));
            }
            if let Some(previous) = seen.insert(program.tag.as_str(), &program.id) {
                return Err(Error::config(format!(
                    "college {college_id:?}: duplicate program tag {:?} (ids {previous:?} and {:?})",
                    program.tag, program.id
                )));
            }
        }
    }
    Ok(())
}
