//! UCD Loader - streaming ingestion of the grouped XML export
//!
//! Converts the stream of start-tag events into rows in the three UCD
//! tables, carrying a small running context: the most recently opened
//! group and the most recently inserted codepoint. Malformed elements are
//! warned about and skipped; they never abort the pass.

pub mod xml;

use std::collections::HashSet;
use std::io::BufRead;

use crate::storage::UcdStore;
use crate::ui::LoadProgress;
use crate::{Result, codepoint};
use xml::{UcdEvent, UcdReader};

/// Outcome of processing a single element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    SkippedMissingField,
    SkippedInvalidValue,
    SkippedDuplicate,
    SkippedNoContext,
}

/// When rows of a given kind become durable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Commit after every inserted row
    PerRow,
    /// Leave rows to the final commit
    AtEnd,
}

/// Commit granularity per row kind. Aliases follow `characters`.
///
/// The default commits group rows eagerly, so progress survives an
/// interrupted run, while character and alias rows ride to the final
/// commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitPolicy {
    pub groups: Granularity,
    pub characters: Granularity,
}

impl Default for CommitPolicy {
    fn default() -> Self {
        Self {
            groups: Granularity::PerRow,
            characters: Granularity::AtEnd,
        }
    }
}

/// Counters reported after a completed pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub groups: usize,
    pub characters: usize,
    pub aliases: usize,
    pub skipped: usize,
}

/// Running context threaded through event processing.
///
/// Updated only on successful (non-skipped) events, except that a skipped
/// character clears the codepoint context so its aliases are dropped
/// rather than attached to the previous character.
#[derive(Debug, Default)]
struct LoaderState {
    current_group: Option<String>,
    current_codepoint: Option<String>,
    seen_groups: HashSet<String>,
}

/// Streaming loader over an open store
pub struct Loader<'a> {
    store: &'a mut UcdStore,
    policy: CommitPolicy,
    state: LoaderState,
}

impl<'a> Loader<'a> {
    pub fn new(store: &'a mut UcdStore, policy: CommitPolicy) -> Self {
        Self {
            store,
            policy,
            state: LoaderState::default(),
        }
    }

    /// Run a single forward pass over the document.
    ///
    /// Opens one transaction for the whole pass; eager flushes are
    /// checkpoint commits inside it. Element-level validation failures are
    /// logged and skipped, storage and XML errors propagate.
    pub fn run<R: BufRead>(
        &mut self,
        reader: &mut UcdReader<R>,
        progress: &LoadProgress,
    ) -> Result<LoadStats> {
        let mut stats = LoadStats::default();

        self.store.begin_transaction()?;
        while let Some(event) = reader.next_event()? {
            progress.element();
            match event {
                UcdEvent::Group { block, name } => {
                    match self.process_group(block, name)? {
                        Outcome::Inserted => {
                            stats.groups += 1;
                            // Current group cannot be None right after an insert.
                            if let Some(name) = self.state.current_group.as_deref() {
                                progress.group(name);
                            }
                            if self.policy.groups == Granularity::PerRow {
                                self.store.checkpoint()?;
                            }
                        }
                        Outcome::SkippedMissingField => {
                            stats.skipped += 1;
                            tracing::warn!(
                                "Group element without a valid name attribute found. Skipping."
                            );
                        }
                        // Repeated group tags are fully inert.
                        Outcome::SkippedDuplicate => {}
                        _ => {}
                    }
                }
                UcdEvent::Char { codepoint, name } => {
                    match self.process_char(codepoint.as_deref(), name.as_deref())? {
                        Outcome::Inserted => {
                            stats.characters += 1;
                            if self.policy.characters == Granularity::PerRow {
                                self.store.checkpoint()?;
                            }
                        }
                        Outcome::SkippedMissingField => {
                            stats.skipped += 1;
                            tracing::warn!(
                                "Character element without 'cp' attribute found. Skipping."
                            );
                        }
                        Outcome::SkippedInvalidValue => {
                            stats.skipped += 1;
                            tracing::warn!(
                                "Invalid character code point '{}' found. Skipping.",
                                codepoint.as_deref().unwrap_or("")
                            );
                        }
                        _ => {}
                    }
                }
                UcdEvent::NameAlias { alias } => match self.process_alias(alias)? {
                    Outcome::Inserted => {
                        stats.aliases += 1;
                        if self.policy.characters == Granularity::PerRow {
                            self.store.checkpoint()?;
                        }
                    }
                    Outcome::SkippedMissingField => {
                        stats.skipped += 1;
                        tracing::warn!(
                            "Name-alias element without 'alias' attribute found. Skipping."
                        );
                    }
                    // Aliases before any character are ignored without a warning.
                    Outcome::SkippedNoContext => {}
                    _ => {}
                },
            }
        }
        self.store.commit()?;

        Ok(stats)
    }

    /// Handle a `group` element: prefer `blk`, fall back to `na`.
    ///
    /// First sight of a name inserts the row and becomes the current group
    /// context; repeats change nothing.
    fn process_group(&mut self, block: Option<String>, name: Option<String>) -> Result<Outcome> {
        let Some(use_name) = block.or(name) else {
            return Ok(Outcome::SkippedMissingField);
        };

        if self.state.seen_groups.contains(&use_name) {
            return Ok(Outcome::SkippedDuplicate);
        }

        self.store.insert_group(&use_name)?;
        self.state.seen_groups.insert(use_name.clone());
        self.state.current_group = Some(use_name);
        Ok(Outcome::Inserted)
    }

    /// Handle a `char` element: validate `cp`, insert under the current
    /// group (which may be absent). A skipped character clears the
    /// codepoint context.
    fn process_char(&mut self, cp: Option<&str>, name: Option<&str>) -> Result<Outcome> {
        let Some(cp) = cp else {
            self.state.current_codepoint = None;
            return Ok(Outcome::SkippedMissingField);
        };

        if codepoint::validate(cp).is_err() {
            self.state.current_codepoint = None;
            return Ok(Outcome::SkippedInvalidValue);
        }

        self.store
            .insert_character(cp, name, self.state.current_group.as_deref())?;
        self.state.current_codepoint = Some(cp.to_string());
        Ok(Outcome::Inserted)
    }

    /// Handle a `name-alias` element for the current codepoint, if any
    fn process_alias(&mut self, alias: Option<String>) -> Result<Outcome> {
        let Some(cp) = self.state.current_codepoint.as_deref() else {
            return Ok(Outcome::SkippedNoContext);
        };

        let Some(alias) = alias else {
            return Ok(Outcome::SkippedMissingField);
        };

        self.store.insert_alias(cp, &alias)?;
        Ok(Outcome::Inserted)
    }
}
