use anyhow::{ensure, Result};

/// Identifiers of the elements the composer binds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub content: String,
    pub preview: String,
    pub add_image_button: String,
    pub file_input: String,
    pub submit_button: String,
    pub form: String,
    pub add_with_image_button: String,
    pub modal: String,
    pub add_post_button: String,
    /// Class carried by every visibility dropdown list
    pub dropdown_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            content: "post-content".to_string(),
            preview: "feed-image-preview".to_string(),
            add_image_button: "feed-add-image-btn".to_string(),
            file_input: "feed-image".to_string(),
            submit_button: "feed-submit-btn".to_string(),
            form: "feed-add-form".to_string(),
            add_with_image_button: "feed-add-with-image-btn".to_string(),
            modal: "feed-add-modal".to_string(),
            add_post_button: "feed-add-btn".to_string(),
            dropdown_class: "post-display-dropdown".to_string(),
        }
    }
}

/// Composer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    pub elements: ElementIds,
    /// Path segment appended to the current page URL when creating a post
    pub posts_path: String,
    /// Media type prefix a file must carry to be previewed
    pub image_media_prefix: String,
    /// Class marking the currently selected dropdown entry
    pub selected_marker_class: String,
    /// Class added to the preview once it holds a file
    pub object_marker_class: String,
    /// Selector, relative to the composer tools container, of the dropdown trigger text
    pub trigger_text_selector: String,
    pub tools_container_selector: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            posts_path: "posts".to_string(),
            image_media_prefix: "image/".to_string(),
            selected_marker_class: "ti-check".to_string(),
            object_marker_class: "obj".to_string(),
            trigger_text_selector: ".display-btn > span".to_string(),
            tools_container_selector: ".composor-tools".to_string(),
        }
    }
}

impl ComposerConfig {
    /// Load overrides from environment variables (and `.env` if present)
    #[cfg(feature = "native")]
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from a variable lookup, falling back to defaults
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("FEED_COMPOSER_POSTS_PATH") {
            let path = path.trim_matches('/').to_string();
            ensure!(!path.is_empty(), "FEED_COMPOSER_POSTS_PATH must not be empty");
            config.posts_path = path;
        }
        if let Some(prefix) = lookup("FEED_COMPOSER_IMAGE_PREFIX") {
            ensure!(!prefix.is_empty(), "FEED_COMPOSER_IMAGE_PREFIX must not be empty");
            config.image_media_prefix = prefix;
        }

        Ok(config)
    }

    /// URL of the posts endpoint for the given page
    pub fn posts_url(&self, page_url: &str) -> String {
        let base = page_url.strip_suffix('/').unwrap_or(page_url);
        format!("{}/{}", base, self.posts_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_page_markup() {
        let config = ComposerConfig::default();
        assert_eq!(config.elements.add_post_button, "feed-add-btn");
        assert_eq!(config.elements.dropdown_class, "post-display-dropdown");
        assert_eq!(config.posts_path, "posts");
        assert_eq!(config.image_media_prefix, "image/");
    }

    #[test]
    fn posts_url_appends_path() {
        let config = ComposerConfig::default();
        assert_eq!(
            config.posts_url("http://localhost:8080/users/3"),
            "http://localhost:8080/users/3/posts"
        );
        assert_eq!(
            config.posts_url("http://localhost:8080/"),
            "http://localhost:8080/posts"
        );
    }

    #[test]
    fn env_overrides_are_applied() {
        let config = ComposerConfig::from_vars(lookup(&[
            ("FEED_COMPOSER_POSTS_PATH", "/articles/"),
            ("FEED_COMPOSER_IMAGE_PREFIX", "image/png"),
        ]))
        .unwrap();
        assert_eq!(config.posts_path, "articles");
        assert_eq!(config.image_media_prefix, "image/png");
    }

    #[test]
    fn empty_posts_path_is_rejected() {
        assert!(ComposerConfig::from_vars(lookup(&[("FEED_COMPOSER_POSTS_PATH", "/")])).is_err());
    }

    #[test]
    fn missing_vars_keep_defaults() {
        let config = ComposerConfig::from_vars(|_| None).unwrap();
        assert_eq!(config, ComposerConfig::default());
    }
}
