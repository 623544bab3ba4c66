use crate::core::git::refs::BranchRef;
use crate::utils::error::{Result, SweepError};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeSet, HashSet};

pub const COMMENT_CHAR: char = '#';

const HEADER: &[&str] = &[
    "Edit this listing to choose which branches to delete.",
    "Remove a line to DELETE that branch; any line left in place is kept.",
    "Lines starting with '#' are ignored. Save and quit when done.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// One flat group per origin (local, then each remote).
    Origin,
    /// Origin groups subdivided by time since last commit.
    Staleness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessBucket {
    Active,
    OlderThan30Days,
    OlderThan90Days,
    OlderThanOneYear,
}

impl StalenessBucket {
    pub const ALL: [StalenessBucket; 4] = [
        StalenessBucket::Active,
        StalenessBucket::OlderThan30Days,
        StalenessBucket::OlderThan90Days,
        StalenessBucket::OlderThanOneYear,
    ];

    /// Every branch falls in exactly one bucket relative to `now`.
    pub fn classify(last_commit: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age = now.signed_duration_since(last_commit);
        if age < Duration::days(30) {
            Self::Active
        } else if age < Duration::days(90) {
            Self::OlderThan30Days
        } else if age < Duration::days(365) {
            Self::OlderThan90Days
        } else {
            Self::OlderThanOneYear
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active (last 30 days)",
            Self::OlderThan30Days => "Older than 30 days",
            Self::OlderThan90Days => "Older than 90 days",
            Self::OlderThanOneYear => "Older than 1 year",
        }
    }
}

/// Ephemeral display tree, at most two levels deep
/// (origin -> staleness bucket -> branches).
#[derive(Debug, Default)]
pub struct BranchGroup {
    pub name: Option<String>,
    pub groups: Vec<BranchGroup>,
    pub branches: Vec<BranchRef>,
}

pub fn group_branches(refs: &[BranchRef], mode: GroupingMode, now: DateTime<Utc>) -> BranchGroup {
    let mut root = BranchGroup::default();

    for origin in origins_in_order(refs) {
        let mut members: Vec<BranchRef> = refs
            .iter()
            .filter(|branch| branch.origin() == origin)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        if members.is_empty() {
            continue;
        }

        let group = match mode {
            GroupingMode::Origin => BranchGroup {
                name: Some(origin),
                groups: Vec::new(),
                branches: members,
            },
            GroupingMode::Staleness => {
                let mut children = Vec::new();
                for bucket in StalenessBucket::ALL {
                    let bucket_members: Vec<BranchRef> = members
                        .iter()
                        .filter(|branch| {
                            StalenessBucket::classify(branch.last_commit, now) == bucket
                        })
                        .cloned()
                        .collect();
                    if bucket_members.is_empty() {
                        continue;
                    }
                    children.push(BranchGroup {
                        name: Some(bucket.label().to_string()),
                        groups: Vec::new(),
                        branches: bucket_members,
                    });
                }
                BranchGroup {
                    name: Some(origin),
                    groups: children,
                    branches: Vec::new(),
                }
            }
        };
        root.groups.push(group);
    }

    root
}

/// "local" first, then remotes alphabetically. Origins with no
/// branches never appear.
fn origins_in_order(refs: &[BranchRef]) -> Vec<String> {
    let mut origins = Vec::new();
    if refs.iter().any(|branch| branch.is_local()) {
        origins.push("local".to_string());
    }
    let remotes: BTreeSet<&str> = refs
        .iter()
        .filter_map(|branch| branch.remote.as_deref())
        .collect();
    origins.extend(remotes.into_iter().map(String::from));
    origins
}

/// Render the editable document: comment lines carry instructions and
/// headings, one reference path per content line. Pure function of
/// (refs, mode, now).
pub fn render_listing(refs: &[BranchRef], mode: GroupingMode, now: DateTime<Utc>) -> String {
    let root = group_branches(refs, mode, now);
    let remote_names: HashSet<&str> = refs
        .iter()
        .filter(|branch| !branch.is_local())
        .map(|branch| branch.name.as_str())
        .collect();

    let mut out = String::new();
    for line in HEADER {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    render_group(&root, 0, &remote_names, &mut out);
    out
}

fn render_group(group: &BranchGroup, depth: usize, remote_names: &HashSet<&str>, out: &mut String) {
    if let Some(name) = &group.name {
        if depth == 1 {
            out.push_str("#\n");
        }
        let indent = "  ".repeat(depth.saturating_sub(1));
        out.push_str(&format!("# {}{}\n", indent, name));
    }

    for branch in &group.branches {
        if branch.is_local() && !remote_names.contains(branch.name.as_str()) {
            out.push_str(&format!("{}  # no remote\n", branch.ref_path));
        } else {
            out.push_str(&format!("{}\n", branch.ref_path));
        }
    }

    for child in &group.groups {
        render_group(child, depth + 1, remote_names, out);
    }
}

/// Strip comments and blanks from the edited document; what remains are
/// the reference paths the user wants to keep.
pub fn parse_preserved_lines(document: &str) -> Vec<String> {
    document
        .lines()
        .map(|line| line.split(COMMENT_CHAR).next().unwrap_or(""))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Every preserved line must name a candidate exactly; anything else is
/// reported in aggregate before any deletion happens.
pub fn validate_preserved(
    preserved: &[String],
    candidates: &[BranchRef],
) -> Result<HashSet<String>> {
    let known: HashSet<&str> = candidates
        .iter()
        .map(|branch| branch.ref_path.as_str())
        .collect();

    let unknown: Vec<String> = preserved
        .iter()
        .filter(|line| !known.contains(line.as_str()))
        .cloned()
        .collect();

    if !unknown.is_empty() {
        return Err(SweepError::unknown_branches(unknown));
    }

    Ok(preserved.iter().cloned().collect())
}
