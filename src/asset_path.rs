/// Resolves logical asset paths (e.g. `/textures/x.png`) against an optional
/// deployment base path such as `/app/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetResolver {
    base_path: String,
}

impl AssetResolver {
    pub fn new(base_path: Option<&str>) -> Self {
        let base_path = base_path
            .map(|b| b.strip_suffix('/').unwrap_or(b).to_string())
            .unwrap_or_default();
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn resolve(&self, path: &str) -> String {
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!("{}{}{}", self.base_path, sep, path)
    }
}

#[inline]
pub fn resolve_asset_path(base_path: Option<&str>, path: &str) -> String {
    AssetResolver::new(base_path).resolve(path)
}
