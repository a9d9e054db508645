use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::settings::resolve::ResolvedSettings;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

/// Export base name.
///
/// `filename` wins when non-empty; otherwise `prefix + "YYYY.MM.DD-hh.mm.ss" + suffix` in local
/// time.
pub fn format_filename(filename: &str, prefix: &str, suffix: &str, now: &NaiveDateTime) -> String {
    if !filename.is_empty() {
        return filename.to_owned();
    }
    format!("{prefix}{}{suffix}", now.format(TIMESTAMP_FORMAT))
}

/// Full output path for an export with extension `ext` (or a directory when `ext` is empty).
pub fn output_path(settings: &ResolvedSettings, ext: &str, now: &NaiveDateTime) -> PathBuf {
    let name = format_filename(&settings.filename, &settings.prefix, &settings.suffix, now);
    if ext.is_empty() {
        settings.out_dir.join(name)
    } else {
        settings.out_dir.join(format!("{name}.{ext}"))
    }
}

/// Current local wall-clock time, as used for export names.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/naming.rs"]
mod tests;
