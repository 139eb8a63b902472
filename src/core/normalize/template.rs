use crate::core::job::JobThread;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\{\{(distro|arch)\}\}").expect("placeholder pattern compiles"))
}

/// Substitute `{{distro}}` and `{{arch}}` placeholders from the thread's
/// build coordinate.
///
/// One scan over the input: substituted values are never re-expanded, and
/// unrecognized placeholders are left verbatim.
pub fn resolve(template: &str, thread: &JobThread) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "distro" => thread.distro.clone(),
            _ => thread.arch.clone(),
        })
        .into_owned()
}
