//! Filename rewriting passes. Every substitution that matches performs
//! its own filesystem rename straight away; later keys then scan the
//! already-updated name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, Substitution};
use crate::error::Result;
use crate::lister::list_music_files;
use crate::logger::Logger;
use crate::parser::FIELD_DELIMITER;
use crate::report::{Outcome, RunReport};

/// Replaces only the right-most occurrence of `pattern`. Without a
/// match the input comes back untouched.
pub fn replace_last(s: &str, pattern: &str, replacement: &str) -> String {
    match s.rfind(pattern) {
        Some(idx) => {
            let mut out = String::with_capacity(s.len() + replacement.len());
            out.push_str(&s[..idx]);
            out.push_str(replacement);
            out.push_str(&s[idx + pattern.len()..]);
            out
        }
        None => s.to_string(),
    }
}

pub fn substitution_pass(config: &Config, logger: &Logger, root: &Path) -> Result<RunReport> {
    let mut report = RunReport::new("substitute");
    for path in list_music_files(root, &config.extensions)? {
        let changed = apply_substitutions(&path, &config.substitutions, logger, config.dry_run)?;
        let outcome = if changed {
            Outcome::Renamed
        } else {
            Outcome::Unchanged
        };
        report.record(&path, outcome);
    }
    Ok(report)
}

/// Runs the whole table against one file. A pattern only counts when it
/// occurs at or after the last ` - `, so album and artist segments are
/// never rewritten. Each hit renames the file before the next key is
/// tried against the new name.
fn apply_substitutions(
    path: &Path,
    substitutions: &[Substitution],
    logger: &Logger,
    dry_run: bool,
) -> Result<bool> {
    let mut current = path.to_path_buf();
    let mut changed = false;
    for sub in substitutions {
        let name = match current.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => return Ok(changed),
        };
        let anchor = name.rfind(FIELD_DELIMITER).unwrap_or(0);
        let in_tail = name
            .rfind(&sub.pattern)
            .map_or(false, |idx| idx >= anchor);
        if !in_tail {
            continue;
        }
        let new_name = replace_last(&name, &sub.pattern, &sub.replacement);
        if new_name == name {
            continue;
        }
        if dry_run {
            logger.log(&format!("would rename {:?} -> {:?}", name, new_name))?;
        } else {
            let dest = current.with_file_name(&new_name);
            fs::rename(&current, &dest)?;
            logger.log(&format!("{:?} rename-> {:?}  done.", name, new_name))?;
            current = dest;
        }
        changed = true;
    }
    Ok(changed)
}

/// Drops every space from the middle segment of a two-delimiter name,
/// keeping the head (first delimiter inclusive) and tail intact. Names
/// without two delimiters cannot be split and yield `None`.
pub fn collapse_middle_spaces(name: &str) -> Option<String> {
    let first = name.find(FIELD_DELIMITER)?;
    let last = name.rfind(FIELD_DELIMITER)?;
    if first == last {
        return None;
    }
    let head = &name[..first + FIELD_DELIMITER.len()];
    let middle = &name[first + FIELD_DELIMITER.len()..last];
    let tail = &name[last..];
    Some(format!("{}{}{}", head, middle.replace(' ', ""), tail))
}

pub fn space_pass(config: &Config, logger: &Logger, root: &Path) -> Result<RunReport> {
    let mut report = RunReport::new("normalize-space");
    for path in list_music_files(root, &config.extensions)? {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        match collapse_middle_spaces(&name) {
            None => {
                logger.log(&format!(
                    "cannot locate two {:?} delimiters in {:?}, skipping",
                    FIELD_DELIMITER, name
                ))?;
                report.record(&path, Outcome::ParseError);
            }
            Some(new_name) if new_name == name => {
                report.record(&path, Outcome::Unchanged);
            }
            Some(new_name) => {
                rename_logged(&path, &new_name, logger, config.dry_run)?;
                report.record(&path, Outcome::Renamed);
            }
        }
    }
    Ok(report)
}

/// Underscores become single spaces. Idempotent after one pass.
pub fn replace_underscores(name: &str) -> Option<String> {
    if !name.contains('_') {
        return None;
    }
    Some(name.replace('_', " "))
}

pub fn underscore_pass(config: &Config, logger: &Logger, root: &Path) -> Result<RunReport> {
    let mut report = RunReport::new("normalize-underscore");
    for path in list_music_files(root, &config.extensions)? {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        match replace_underscores(&name) {
            None => report.record(&path, Outcome::Unchanged),
            Some(new_name) => {
                rename_logged(&path, &new_name, logger, config.dry_run)?;
                report.record(&path, Outcome::Renamed);
            }
        }
    }
    Ok(report)
}

pub(crate) fn rename_logged(
    path: &Path,
    new_name: &str,
    logger: &Logger,
    dry_run: bool,
) -> Result<PathBuf> {
    let dest = path.with_file_name(new_name);
    if dry_run {
        logger.log(&format!(
            "would rename {} -> {}",
            path.display(),
            dest.display()
        ))?;
        return Ok(dest);
    }
    fs::rename(path, &dest)?;
    logger.log(&format!("renamed {} -> {}", path.display(), dest.display()))?;
    Ok(dest)
}
