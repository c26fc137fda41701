use crate::config::BlogConfig;
use crate::store::ArticleStore;
use crate::theme::{MemoryPreferences, ThemeContext};
use std::sync::Arc;

/// Everything a view needs, handed in explicitly: configuration, the
/// read-only article store and the theme state.
#[derive(Debug, Clone)]
pub struct SiteContext {
    config: BlogConfig,
    store: Arc<ArticleStore>,
    theme: ThemeContext,
}

impl SiteContext {
    pub fn new(config: BlogConfig, store: ArticleStore) -> SiteContext {
        let theme = ThemeContext::with_default(MemoryPreferences::default(), config.theme.default);
        SiteContext {
            config,
            store: Arc::new(store),
            theme,
        }
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    /// Shared handle for tasks that outlive a borrow, e.g. debounced search.
    pub fn store_handle(&self) -> Arc<ArticleStore> {
        Arc::clone(&self.store)
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeContext {
        &mut self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn theme_starts_from_config_default() {
        let mut config = BlogConfig::default();
        config.theme.default = Theme::Light;
        let mut ctx = SiteContext::new(config, ArticleStore::default());
        assert!(ctx.theme().is_light());

        ctx.theme_mut().toggle();
        assert!(ctx.theme().is_dark());
    }

    #[test]
    fn store_handle_shares_the_store() {
        let ctx = SiteContext::new(BlogConfig::default(), ArticleStore::bundled().unwrap());
        let handle = ctx.store_handle();
        assert_eq!(handle.len(), ctx.store().len());
        assert!(Arc::ptr_eq(&handle, &ctx.store_handle()));
    }
}
