use crate::gui::wheel::ICON_SIZE;
use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use orbit::skill::IconName;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static PATHS: OnceLock<RwLock<HashMap<IconName, Option<PathBuf>>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<IconName, Option<PathBuf>>> {
    PATHS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Forgets resolved paths, e.g. after the icon theme or config changed.
pub fn clear_cache() {
    cache().write().clear();
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if let Some(hit) = cache().read().get(icon_name) {
        return hit.clone();
    }
    let resolved = resolve(icon_name);
    cache().write().insert(icon_name.clone(), resolved.clone());
    resolved
}

fn resolve(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(ICON_SIZE as u16)
        .with_scale(1)
        .find()
}

pub fn load_pixbuf(icon_name: &IconName) -> Option<Pixbuf> {
    let path = find_icon_path(icon_name).or_else(|| {
        log::warn!("Icon '{}' not found", icon_name);
        None
    })?;

    Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
        .map_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_icons_resolve_to_none() {
        assert_eq!(find_icon_path(&IconName::new("")), None);
        assert_eq!(
            find_icon_path(&IconName::new("/nonexistent/skillwheel/icon.png")),
            None
        );
        // cached negative result
        assert!(
            cache()
                .read()
                .contains_key(&IconName::new("/nonexistent/skillwheel/icon.png"))
        );
    }
}
