use indexmap::IndexMap;

/// Profil d'inférence: options `clé = valeur` dans l'ordre du fichier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    entries: IndexMap<String, String>,
}

/// Ligne de profil invalide
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("ligne {line}: {reason}")]
pub struct ProfileParseError {
    pub line: usize,
    pub reason: String,
}

impl Profile {
    /// Analyse le contenu d'un fichier `.ini` de profil.
    ///
    /// Seul le premier `=` sépare la clé de la valeur. Les lignes vides et celles
    /// commençant par `#` ou `;` sont ignorées. Une clé répétée garde sa position
    /// d'origine et prend la dernière valeur.
    pub fn parse(name: &str, content: &str) -> Result<Self, ProfileParseError> {
        let mut entries = IndexMap::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ProfileParseError {
                line: index + 1,
                reason: format!("séparateur '=' manquant dans `{}`", line),
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ProfileParseError {
                    line: index + 1,
                    reason: format!("clé vide dans `{}`", line),
                });
            }

            entries.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self {
            name: name.to_string(),
            entries,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let content = "# commentaire\n; autre commentaire\n\n  seed = 42 \nthreads=8\n";
        let profile = Profile::parse("llama", content).unwrap();

        assert_eq!(profile.name(), "llama");
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.get("seed"), Some("42"));
        assert_eq!(profile.get("threads"), Some("8"));
    }

    #[test]
    fn test_parse_preserves_order_and_last_value_wins() {
        let content = "model = a.bin\nseed = 1\ncolor =\nseed = 2\n";
        let profile = Profile::parse("p", content).unwrap();

        let keys: Vec<&str> = profile.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["model", "seed", "color"]);
        assert_eq!(profile.get("seed"), Some("2"));
        assert_eq!(profile.get("color"), Some(""));
    }

    #[test]
    fn test_parse_splits_on_first_equal_only() {
        let profile = Profile::parse("p", "prompt = a=b=c").unwrap();
        assert_eq!(profile.get("prompt"), Some("a=b=c"));
    }

    #[test]
    fn test_parse_rejects_line_without_separator() {
        let err = Profile::parse("p", "seed = 1\ninteractive\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("interactive"));
    }

    #[test]
    fn test_parse_rejects_empty_key() {
        let err = Profile::parse("p", "= 12").unwrap_err();
        assert_eq!(err.line, 1);
    }
}
