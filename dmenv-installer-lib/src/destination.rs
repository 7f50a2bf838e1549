use crate::error::{ResolveError, SelectionError};
use crate::release::Platform;
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

/// Where to install the executable: `explicit` verbatim when given, otherwise a writable
/// directory from `search_path` chosen interactively through `input`/`output`.
pub fn resolve_destination<R: BufRead, W: Write>(
    explicit: Option<&Path>,
    platform: Platform,
    tool_name: &str,
    search_path: Option<&OsStr>,
    input: R,
    output: W,
) -> Result<PathBuf, ResolveError> {
    if let Some(dest) = explicit {
        return Ok(dest.to_path_buf());
    }

    let candidates = candidate_dirs(search_path, is_writable_dir);
    let index = select_candidate(&candidates, tool_name, input, output)?;
    Ok(candidates[index].join(platform.executable_name(tool_name)))
}

/// Entries of `search_path` accepted by `is_writable`, in their original order.
pub fn candidate_dirs<F>(search_path: Option<&OsStr>, is_writable: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let Some(search_path) = search_path else {
        return Vec::new();
    };

    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .filter(|dir| is_writable(dir.as_path()))
        .collect()
}

/// Whether the current process can create files in `dir`.
///
/// Permission bits alone do not answer this (ACLs, read-only mounts, root), so a
/// throwaway file is created and removed.
pub fn is_writable_dir(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    tempfile::Builder::new()
        .prefix(".dmenv-installer-probe")
        .tempfile_in(dir)
        .is_ok()
}

/// Parses one answer to the location prompt into a zero-based index.
/// Integers too large for `i64` are still numbers, just out of range.
pub fn parse_selection(input: &str, candidate_count: usize) -> Result<usize, SelectionError> {
    let out_of_range = SelectionError::OutOfRange {
        count: candidate_count,
    };
    let number: i64 = match input.trim().parse() {
        Ok(number) => number,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(out_of_range);
        }
        Err(_) => return Err(SelectionError::NotANumber),
    };

    if number < 1 || number as u64 > candidate_count as u64 {
        return Err(out_of_range);
    }

    Ok(number as usize - 1)
}

/// Lists `candidates` and asks until a valid entry is chosen. Returns its zero-based index.
pub fn select_candidate<R: BufRead, W: Write>(
    candidates: &[PathBuf],
    tool_name: &str,
    mut input: R,
    mut output: W,
) -> Result<usize, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoWritableLocation);
    }

    writeln!(output, "Here are the possible locations to install {tool_name}")?;
    writeln!(output, "Select one element in the list")?;
    for (i, dir) in candidates.iter().enumerate() {
        writeln!(output, "{:>2} {}", i + 1, dir.display())?;
    }

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(ResolveError::InputClosed);
        }

        match parse_selection(&line, candidates.len()) {
            Ok(index) => return Ok(index),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}
