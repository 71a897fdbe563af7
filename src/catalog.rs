//! Menu catalog: the ordered list of named cook presets.
//!
//! The catalog is the sole owner of [`MenuEntry`] records.  Timers never
//! hold a reference into it: selecting a menu copies the entry's name and
//! cook time into the slot, so later edits and deletes here cannot reach a
//! countdown that is already running.
//!
//! Insertion order is display order.  Edits preserve position and id.

use core::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of a stored menu identifier.
pub const MENU_ID_CAPACITY: usize = 32;

// ═══════════════════════════════════════════════════════════════
//  Identifiers
// ═══════════════════════════════════════════════════════════════

/// Opaque, stable identifier of a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(heapless::String<MENU_ID_CAPACITY>);

impl MenuId {
    /// Build an id from text.  Returns `None` if it is empty or longer
    /// than [`MENU_ID_CAPACITY`] bytes.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        heapless::String::try_from(raw).ok().map(Self)
    }

    fn from_seq(seq: u64) -> Self {
        let mut s = heapless::String::new();
        // u64 in decimal is at most 20 bytes.
        let _ = fmt::Write::write_fmt(&mut s, format_args!("{seq}"));
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Cook time
// ═══════════════════════════════════════════════════════════════

/// A validated, strictly positive cook duration in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CookTime(u32);

impl CookTime {
    pub fn from_secs(secs: u32) -> Result<Self, ValidationError> {
        if secs == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(Self(secs))
    }

    /// Minutes are unconstrained; seconds must lie in 0..=59.
    pub fn from_parts(minutes: u32, seconds: u32) -> Result<Self, ValidationError> {
        if seconds > 59 {
            return Err(ValidationError::SecondsOutOfRange(seconds));
        }
        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or(ValidationError::Malformed)?;
        Self::from_secs(total)
    }

    /// Parse `M:SS`, `MM:SS`, or a bare seconds count.
    ///
    /// Blank components read as zero, matching an untouched input field.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        match input.split_once(':') {
            Some((m, s)) => Self::from_parts(parse_component(m)?, parse_component(s)?),
            None => Self::from_secs(parse_component(input)?),
        }
    }

    pub fn as_secs(self) -> u32 {
        self.0
    }

    /// Split into `(minutes, seconds)` for pre-filling an edit form.
    pub fn to_parts(self) -> (u32, u32) {
        (self.0 / 60, self.0 % 60)
    }
}

impl fmt::Display for CookTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_mm_ss(self.0))
    }
}

fn parse_component(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>().map_err(|_| ValidationError::Malformed)
}

/// Zero-padded `MM:SS`.  Minutes grow past two digits when needed.
pub fn format_mm_ss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

// ═══════════════════════════════════════════════════════════════
//  Records
// ═══════════════════════════════════════════════════════════════

/// One named cook preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: MenuId,
    pub name: String,
    pub cook_secs: u32,
}

impl MenuEntry {
    pub fn cook_time(&self) -> CookTime {
        CookTime(self.cook_secs)
    }
}

/// Reject blank names.  Returns the name exactly as given; trimming is
/// only used for the emptiness check.
fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════
//  Catalog
// ═══════════════════════════════════════════════════════════════

/// Ordered, mutable collection of [`MenuEntry`] records.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    entries: Vec<MenuEntry>,
    /// Next candidate for a generated id.
    next_seq: u64,
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::from_entries(Vec::new())
    }
}

impl MenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from previously stored records.
    ///
    /// The id sequence resumes past the largest numeric id seen, so ids
    /// handed out after a restart never collide with stored ones.
    /// Records that would violate the catalog invariants (blank name, zero
    /// cook time, duplicate id) are dropped with a warning.
    pub fn from_entries(mut entries: Vec<MenuEntry>) -> Self {
        let mut seen = std::collections::HashSet::new();
        entries.retain(|e| {
            let ok = !e.name.trim().is_empty() && e.cook_secs > 0 && seen.insert(e.id.clone());
            if !ok {
                warn!("Catalog: dropping invalid stored entry {} '{}'", e.id, e.name);
            }
            ok
        });
        let next_seq = entries
            .iter()
            .filter_map(|e| e.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |m| m.saturating_add(1));
        Self { entries, next_seq }
    }

    /// Built-in seed used when nothing usable is stored.
    pub fn with_defaults() -> Self {
        Self::from_entries(default_entries())
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Append a new record with a fresh id.  Returns the id.
    pub fn add(&mut self, name: &str, cook: CookTime) -> Result<MenuId, ValidationError> {
        validate_name(name)?;
        let id = self.fresh_id();
        info!("Catalog: added '{}' ({}) as {}", name, cook, id);
        self.entries.push(MenuEntry {
            id: id.clone(),
            name: name.to_string(),
            cook_secs: cook.as_secs(),
        });
        Ok(id)
    }

    /// Replace the record matching `id` in place.
    ///
    /// Validation runs first and is reported even when `id` is absent.
    /// Returns `Ok(false)` (and changes nothing) if no record matched.
    pub fn edit(&mut self, id: &MenuId, name: &str, cook: CookTime) -> Result<bool, ValidationError> {
        validate_name(name)?;
        match self.entries.iter_mut().find(|e| &e.id == id) {
            Some(entry) => {
                info!(
                    "Catalog: edited {} '{}' ({}) -> '{}' ({})",
                    id,
                    entry.name,
                    entry.cook_time(),
                    name,
                    cook
                );
                entry.name = name.to_string();
                entry.cook_secs = cook.as_secs();
                Ok(true)
            }
            None => {
                debug!("Catalog: edit ignored, no entry {}", id);
                Ok(false)
            }
        }
    }

    /// Remove the record matching `id`.  Returns `false` if absent.
    pub fn delete(&mut self, id: &MenuId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            info!("Catalog: deleted {}", id);
        } else {
            debug!("Catalog: delete ignored, no entry {}", id);
        }
        removed
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn get(&self, id: &MenuId) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Position of `id` in display order.
    pub fn position(&self, id: &MenuId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Internal ──────────────────────────────────────────────

    fn fresh_id(&mut self) -> MenuId {
        loop {
            let id = MenuId::from_seq(self.next_seq);
            self.next_seq = self.next_seq.wrapping_add(1);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn default_entries() -> Vec<MenuEntry> {
    [
        ("1", "Wings (First Cook)", 420),
        ("2", "Boneless (First Cook)", 360),
        ("3", "French Fries", 330),
    ]
    .into_iter()
    .filter_map(|(id, name, cook_secs)| {
        Some(MenuEntry {
            id: MenuId::new(id)?,
            name: name.to_string(),
            cook_secs,
        })
    })
    .collect()
}
