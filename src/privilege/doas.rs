//! Minimal reader for doas.conf(5) `permit` rules.

/// Group assumed when no doas configuration can be read.
pub const FALLBACK_GROUP: &str = "wheel";

/// Groups granted elevation by `permit` rules, in file order, deduplicated.
pub fn permitted_groups(config: &str) -> Vec<String> {
    let mut groups: Vec<String> = Vec::new();
    for identity in permit_identities(config) {
        if let Some(group) = identity.strip_prefix(':')
            && !group.is_empty()
            && !groups.iter().any(|g| g == group)
        {
            groups.push(group.to_string());
        }
    }
    groups
}

/// Users granted elevation by name in `permit` rules.
pub fn permitted_users(config: &str) -> Vec<String> {
    permit_identities(config)
        .into_iter()
        .filter(|id| !id.starts_with(':'))
        .map(str::to_string)
        .collect()
}

/// The identity of every `permit` rule. `deny` rules are skipped, as are the
/// options, `as` and `cmd` clauses.
fn permit_identities(config: &str) -> Vec<&str> {
    config
        .lines()
        .filter_map(|line| rule_identity(line.split('#').next().unwrap_or("")))
        .collect()
}

// permit [options] identity [as target] [cmd command [args ...]]
fn rule_identity(line: &str) -> Option<&str> {
    let mut words = line.split_whitespace();
    if words.next()? != "permit" {
        return None;
    }
    let mut in_setenv = false;
    for word in words {
        if in_setenv {
            in_setenv = !word.ends_with('}');
            continue;
        }
        match word {
            "nopass" | "nolog" | "persist" | "keepenv" | "setenv" => {}
            "{" => in_setenv = true,
            w if w.starts_with('{') => in_setenv = !w.ends_with('}'),
            w if w.starts_with("setenv{") => in_setenv = !w.ends_with('}'),
            identity => return Some(identity),
        }
    }
    None
}
