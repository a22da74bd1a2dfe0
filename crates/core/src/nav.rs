//! Route rules for menu entries: active matching, what a selection does,
//! locale-prefixed hrefs and locale switching.

use folio_protocol::{Locale, MenuItem, NavAction, NavItem, Region};

/// Keys of the site menu, in display order, with the target under the
/// locale prefix. `access` lands on the services section.
const SITE_MENU: [(&str, &str); 8] = [
    ("home", ""),
    ("about", "#about"),
    ("capabilities", "#capabilities"),
    ("projects", "#projects"),
    ("stack", "#stack"),
    ("access", "#services"),
    ("log", "/log"),
    ("contact", "#contact"),
];

/// Split `path#fragment`. An empty fragment counts as none.
pub fn split_href(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, fragment)) if !fragment.is_empty() => (path, Some(fragment)),
        Some((path, _)) => (path, None),
        None => (href, None),
    }
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Whether `href` is the current location.
///
/// Anchor hrefs are active when their page is the current path. Route hrefs
/// are active on an exact match or when the current path is below them.
pub fn is_active(href: &str, current_path: &str) -> bool {
    let current = normalize(current_path);
    match split_href(href) {
        ("", Some(_)) => true,
        (path, Some(_)) => normalize(path) == current,
        (path, None) => {
            let path = normalize(path);
            current == path
                || (path != "/"
                    && current.len() > path.len()
                    && current.starts_with(path)
                    && current.as_bytes()[path.len()] == b'/')
        }
    }
}

pub fn menu_items(items: &[NavItem], current_path: &str) -> Vec<MenuItem> {
    items
        .iter()
        .map(|item| MenuItem {
            key: item.key.clone(),
            href: item.href.clone(),
            label: item.label.clone(),
            is_active: is_active(&item.href, current_path),
        })
        .collect()
}

/// What selecting `href` does from `current_path`.
pub fn resolve(href: &str, current_path: &str) -> NavAction {
    match split_href(href) {
        (path, Some(id)) if path.is_empty() || normalize(path) == normalize(current_path) => {
            NavAction::Anchor { id: id.to_owned() }
        }
        (path, Some(id)) => NavAction::RouteThenAnchor {
            path: path.to_owned(),
            id: id.to_owned(),
        },
        (path, None) => NavAction::Route {
            path: path.to_owned(),
        },
    }
}

/// `/<locale>` followed by `target` (`""`, `"#section"` or `"/page"`).
pub fn locale_href(locale: Locale, target: &str) -> String {
    format!("/{}{}", locale.code(), target)
}

/// The canonical site menu. Labels are message keys for the `nav` namespace.
pub fn site_menu(locale: Locale) -> Vec<NavItem> {
    SITE_MENU
        .iter()
        .map(|(key, target)| NavItem::new(*key, locale_href(locale, target), *key))
        .collect()
}

/// Language switcher entries for `path`: every locale, grouped by region,
/// each pointing at the same page under that locale. Keys are
/// `<region>/<code>`, labels are native names.
pub fn locale_menu(path: &str) -> Vec<NavItem> {
    let from = locale_of(path);
    Region::ALL
        .into_iter()
        .flat_map(|region| region.locales().iter().map(move |l| (region, *l)))
        .map(|(region, locale)| {
            NavItem::new(
                format!("{}/{}", region_code(region), locale.code()),
                switch_locale(path, from, locale),
                locale.native_name(),
            )
        })
        .collect()
}

fn region_code(region: Region) -> &'static str {
    match region {
        Region::Amer => "amer",
        Region::Emea => "emea",
        Region::Apac => "apac",
        Region::Mena => "mena",
    }
}

/// Locale from the first path segment, falling back to the default.
pub fn locale_of(path: &str) -> Locale {
    let first = path.trim_start_matches('/').split(['/', '#', '?']).next();
    Locale::resolve(first)
}

/// Same page under another locale.
pub fn switch_locale(path: &str, from: Locale, to: Locale) -> String {
    let prefix = format!("/{}", from.code());
    match path.strip_prefix(&prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '#', '?']) => {
            format!("/{}{}", to.code(), rest)
        }
        _ => {
            let rest = path.trim_start_matches('/');
            if rest.is_empty() {
                format!("/{}", to.code())
            } else {
                format!("/{}/{}", to.code(), rest)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_active_on_its_page() {
        assert!(is_active("/en#about", "/en"));
        assert!(is_active("/en#about", "/en/"));
        assert!(!is_active("/en#about", "/en/log"));
        assert!(is_active("#about", "/en/log"));
    }

    #[test]
    fn route_active_on_exact_or_prefix() {
        assert!(is_active("/en/log", "/en/log"));
        assert!(is_active("/en/log", "/en/log/2024"));
        assert!(!is_active("/en/log", "/en/logbook"));
        assert!(is_active("/en", "/en/log"));
        assert!(!is_active("/en", "/ru"));
    }

    #[test]
    fn resolve_same_page_anchor() {
        assert_eq!(
            resolve("/en#projects", "/en"),
            NavAction::Anchor {
                id: "projects".into()
            }
        );
    }

    #[test]
    fn resolve_cross_page_anchor() {
        assert_eq!(
            resolve("/en#contact", "/en/log"),
            NavAction::RouteThenAnchor {
                path: "/en".into(),
                id: "contact".into()
            }
        );
        assert_eq!(
            resolve("/en/log", "/en"),
            NavAction::Route {
                path: "/en/log".into()
            }
        );
    }

    #[test]
    fn site_menu_is_locale_prefixed() {
        let menu = site_menu(Locale::De);
        assert_eq!(menu.len(), 8);
        assert_eq!(menu[0].href, "/de");
        assert_eq!(menu[5].key, "access");
        assert_eq!(menu[5].href, "/de#services");
        assert_eq!(menu[6].href, "/de/log");
    }

    #[test]
    fn menu_items_mark_active() {
        let items = menu_items(&site_menu(Locale::En), "/en/log");
        let active: Vec<_> = items
            .iter()
            .filter(|i| i.is_active)
            .map(|i| i.key.as_str())
            .collect();
        assert_eq!(active, vec!["home", "log"]);
    }

    #[test]
    fn switch_locale_rewrites_prefix() {
        assert_eq!(switch_locale("/en/log", Locale::En, Locale::Ja), "/ja/log");
        assert_eq!(switch_locale("/en", Locale::En, Locale::Fr), "/fr");
        assert_eq!(switch_locale("/english", Locale::En, Locale::Fr), "/fr/english");
        assert_eq!(switch_locale("/", Locale::En, Locale::He), "/he");
    }

    #[test]
    fn locale_menu_points_at_the_same_page() {
        let menu = locale_menu("/en/log");
        assert_eq!(menu.len(), Locale::ALL.len());
        assert_eq!(menu[0].key, "amer/en");
        let ja = menu.iter().find(|i| i.key == "apac/ja").unwrap();
        assert_eq!(ja.href, "/ja/log");
        assert_eq!(ja.label, "日本語");

        let active: Vec<_> = menu_items(&menu, "/en/log")
            .into_iter()
            .filter(|i| i.is_active)
            .map(|i| i.key)
            .collect();
        assert_eq!(active, vec!["amer/en"]);
    }

    #[test]
    fn locale_from_path() {
        assert_eq!(locale_of("/ko/log"), Locale::Ko);
        assert_eq!(locale_of("/"), Locale::En);
        assert_eq!(locale_of("/zz"), Locale::En);
    }
}
