use crate::models::{Catalog, Category, Endpoint};
use std::borrow::Cow;

/// Narrows a catalog to endpoints whose path, description or method contain
/// `query`, case-insensitively.
///
/// Categories left without endpoints are dropped; surviving categories and
/// endpoints keep their source order. A blank query borrows the input as is.
pub fn filter_catalog<'a>(catalog: &'a Catalog, query: &str) -> Cow<'a, Catalog> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Cow::Borrowed(catalog);
    }

    let categories = catalog
        .categories
        .iter()
        .filter_map(|category| {
            let endpoints: Vec<Endpoint> = category
                .endpoints
                .iter()
                .filter(|endpoint| endpoint_matches(endpoint, &needle))
                .cloned()
                .collect();

            (!endpoints.is_empty()).then(|| Category {
                name: category.name.clone(),
                description: category.description.clone(),
                endpoints,
            })
        })
        .collect();

    Cow::Owned(Catalog {
        base_url: catalog.base_url.clone(),
        categories,
    })
}

/// `needle` must already be lowercased.
fn endpoint_matches(endpoint: &Endpoint, needle: &str) -> bool {
    endpoint.path.to_lowercase().contains(needle)
        || endpoint.description.to_lowercase().contains(needle)
        || endpoint.method.as_str().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{auth_admin_catalog, booking_catalog};

    fn paths(catalog: &Catalog) -> Vec<(&str, Vec<&str>)> {
        catalog
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.endpoints.iter().map(|e| e.path.as_str()).collect()))
            .collect()
    }

    #[test]
    fn stats_query_keeps_only_admin() {
        let catalog = auth_admin_catalog();
        let filtered = filter_catalog(&catalog, "stats");

        assert_eq!(filtered.categories.len(), 1);
        assert_eq!(filtered.categories[0].name, "Admin");
        assert_eq!(filtered.categories[0].endpoints.len(), 1);
        assert_eq!(filtered.base_url, catalog.base_url);
    }

    #[test]
    fn blank_query_borrows_original() {
        let catalog = booking_catalog();
        for query in ["", "   ", "\t\n"] {
            let filtered = filter_catalog(&catalog, query);
            assert!(matches!(filtered, Cow::Borrowed(_)));
            assert_eq!(*filtered, catalog);
        }
    }

    #[test]
    fn match_is_case_insensitive_across_fields() {
        let catalog = booking_catalog();

        let by_description = filter_catalog(&catalog, "RESCHEDULE");
        assert_eq!(paths(&by_description), vec![("Appointments", vec!["/appointments/:id"])]);

        let by_method = filter_catalog(&catalog, "delete");
        assert_eq!(paths(&by_method), vec![("Doctors", vec!["/doctors/:id"])]);

        let by_path = filter_catalog(&catalog, "/Doctors");
        assert_eq!(by_path.categories.len(), 1);
        assert_eq!(by_path.categories[0].endpoints.len(), 3);
    }

    #[test]
    fn surviving_order_is_preserved() {
        let catalog = booking_catalog();
        // "list" hits one endpoint in each non-empty category.
        let filtered = filter_catalog(&catalog, "list");
        assert_eq!(
            paths(&filtered),
            vec![
                ("Doctors", vec!["/doctors"]),
                ("Appointments", vec!["/appointments"]),
            ]
        );
    }

    #[test]
    fn empty_categories_never_survive_a_query() {
        let catalog = booking_catalog();
        let filtered = filter_catalog(&catalog, "o");
        assert!(filtered.categories.iter().all(|c| !c.endpoints.is_empty()));
        assert!(filtered.categories.iter().all(|c| c.name != "Reports"));
    }

    #[test]
    fn no_match_yields_no_categories() {
        let catalog = auth_admin_catalog();
        assert!(filter_catalog(&catalog, "invoices").categories.is_empty());
    }

    #[test]
    fn filtering_is_pure_and_repeatable() {
        let catalog = booking_catalog();
        let before = catalog.clone();
        let first = filter_catalog(&catalog, "doctor").into_owned();
        let second = filter_catalog(&catalog, "doctor").into_owned();
        assert_eq!(first, second);
        assert_eq!(catalog, before);
    }
}
