// utils/args.rs
use std::ffi::OsString;

/// Accepte la syntaxe historique à tiret simple (`-modelName alpaca`).
///
/// Tout argument `-nom` dont `nom` figure dans `long_names` devient `--nom`;
/// le reste est transmis tel quel à clap.
pub fn normalize_legacy_flags<I, T>(args: I, long_names: &[&str]) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let legacy = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| !name.starts_with('-'))
                .map(|name| name.split_once('=').map_or(name, |(flag, _)| flag))
                .is_some_and(|flag| long_names.contains(&flag));

            if legacy {
                let mut converted = OsString::from("-");
                converted.push(&arg);
                converted
            } else {
                arg
            }
        })
        .collect()
}
