//! Simulation and species definition files.
//!
//! A simulation file wraps a [`SimulationDefinition`] under a `simulation`
//! key. Species files live in one directory, one `<Species>.json` per
//! species, each a (possibly partial) [`SpeciesDefinition`].

use crate::error::{IoError, Result};
use crate::serialization::{from_json, read_json_file};
use ecosim_data::{SimulationDefinition, SimulationFile, SpeciesDefinition};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Parses and validates a simulation file's contents.
pub fn parse_simulation(json: &str) -> Result<SimulationDefinition> {
    let file: SimulationFile = from_json(json)?;
    validate_simulation(&file.simulation)?;
    Ok(file.simulation)
}

/// Reads, parses and validates a simulation file.
pub fn load_simulation<P: AsRef<Path>>(path: P) -> Result<SimulationDefinition> {
    let path = path.as_ref();
    let file: SimulationFile = read_json_file(path)?;
    validate_simulation(&file.simulation)
        .map_err(|e| e.with_context(format!("validating {path:?}")))?;
    tracing::info!(
        path = %path.display(),
        species = file.simulation.initial_population.len(),
        "Loaded simulation definition"
    );
    Ok(file.simulation)
}

fn validate_simulation(sim: &SimulationDefinition) -> Result<()> {
    let size = sim.world.size;
    if !(size.width.is_finite() && size.width > 0.0) {
        return Err(IoError::validation(format!(
            "world width must be positive, got {}",
            size.width
        )));
    }
    if !(size.height.is_finite() && size.height > 0.0) {
        return Err(IoError::validation(format!(
            "world height must be positive, got {}",
            size.height
        )));
    }
    for (name, count) in &sim.initial_population {
        if count.male.saturating_add(count.female) != count.total {
            tracing::warn!(
                species = %name,
                total = count.total,
                male = count.male,
                female = count.female,
                "Population counts disagree; members past `male` spawn female"
            );
        }
    }
    Ok(())
}

/// Lazily loaded, cached species definitions from one directory.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    dir: PathBuf,
    cache: HashMap<String, SpeciesDefinition>,
}

impl SpeciesCatalog {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `species`. Names that could escape the directory are
    /// rejected.
    pub fn path_for(&self, species: &str) -> Result<PathBuf> {
        let invalid = species.is_empty()
            || species.contains(['/', '\\'])
            || species == "."
            || species == "..";
        if invalid {
            return Err(IoError::validation(format!(
                "invalid species name {species:?}"
            )));
        }
        Ok(self.dir.join(format!("{species}.json")))
    }

    /// Returns the definition for `species`, reading it on first use.
    pub fn load(&mut self, species: &str) -> Result<SpeciesDefinition> {
        if let Some(def) = self.cache.get(species) {
            return Ok(def.clone());
        }
        let path = self.path_for(species)?;
        let def: SpeciesDefinition = read_json_file(&path)
            .map_err(|e| e.with_context(format!("loading species {species}")))?;
        tracing::debug!(species, path = %path.display(), "Species definition loaded");
        self.cache.insert(species.to_string(), def.clone());
        Ok(def)
    }

    /// Registers a definition without touching the disk.
    pub fn insert(&mut self, species: impl Into<String>, def: SpeciesDefinition) {
        self.cache.insert(species.into(), def);
    }

    /// Forgets cached definitions so the next load re-reads the files.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Species names with a `.json` file in the directory, sorted.
    pub fn available(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}
