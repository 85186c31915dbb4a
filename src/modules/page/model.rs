use std::path::{Path, PathBuf};

pub const PUBLIC_PAGES: [&str; 4] =
    ["index.html", "registration.html", "login.html", "auth_required.html"];

pub const ASSET_DIRS: [&str; 3] = ["js", "css", "images"];

/// Directory the front end is served from.
#[derive(Debug, Clone)]
pub struct PageRoot(PathBuf);

impl PageRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PageRoot(root.into())
    }

    pub fn page(&self, name: &str) -> Option<PathBuf> {
        self.resolve("pages", name)
    }

    pub fn asset(&self, dir: &str, name: &str) -> Option<PathBuf> {
        if !ASSET_DIRS.contains(&dir) {
            return None;
        }
        self.resolve(dir, name)
    }

    /// A single plain file name under `dir`; anything that could climb out of
    /// the root is refused.
    fn resolve(&self, dir: &str, name: &str) -> Option<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        valid.then(|| self.0.join(dir).join(Path::new(name)))
    }
}

pub fn is_public_page(name: &str) -> bool {
    PUBLIC_PAGES.contains(&name)
}
