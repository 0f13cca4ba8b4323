use itertools::Itertools;

use crate::context::{Context, ModValue, Mods};
use crate::settings::Settings;

const SPACE: &str = " ";
const STATE_PREFIX: &str = "is-";

/// Convert one modifier spec into suffixes, e.g. `{color: "red"}` → `["_color_red"]`.
///
/// Falsy values are skipped, `true` yields `separator + key`, and any other value
/// yields `separator + key + mod_value + value`.
pub(crate) fn mods_to_suffixes(mods: &Mods, separator: &str, mod_value: &str) -> Vec<String> {
    mods.iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(key, value)| match value {
            ModValue::Bool(true) => format!("{separator}{key}"),
            other => format!("{separator}{key}{mod_value}{other}"),
        })
        .collect()
}

pub(crate) fn render(ctx: &Context, settings: &Settings) -> String {
    let name = format!("{}{}", settings.ns, ctx.name);
    let mut class_list = name.clone();

    for spec in &ctx.mods {
        for suffix in mods_to_suffixes(spec, &settings.modifier, &settings.mod_value) {
            class_list.push_str(SPACE);
            class_list.push_str(&name);
            class_list.push_str(&suffix);
        }
    }

    if !ctx.mixes.is_empty() {
        class_list.push_str(SPACE);
        class_list.push_str(&ctx.mixes.iter().join(SPACE));
    }

    for (state, on) in ctx.states.iter() {
        if on {
            class_list.push_str(SPACE);
            class_list.push_str(STATE_PREFIX);
            class_list.push_str(state);
        }
    }

    tracing::trace!(name = %ctx.name, classes = %class_list, "rendered block");
    class_list
}

/// String-split semantics over a rendered class list.
///
/// `None` keeps the whole string, `Some("")` splits into characters, and `limit`
/// caps the number of returned pieces.
pub(crate) fn split(classes: &str, separator: Option<&str>, limit: Option<usize>) -> Vec<String> {
    let limit = limit.unwrap_or(usize::MAX);
    match separator {
        None => std::iter::once(classes.to_string()).take(limit).collect(),
        Some("") => classes.chars().map(String::from).take(limit).collect(),
        Some(sep) => classes.split(sep).map(str::to_string).take(limit).collect(),
    }
}
