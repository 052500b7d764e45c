use super::view_tree::{EndpointDetails, EndpointView, ViewTree};
use std::fmt::Write;

const EXPANDED: &str = "▾";
const COLLAPSED: &str = "▸";

/// Paints a view tree as indented terminal text.
pub fn paint(tree: &ViewTree) -> String {
    let mut out = String::new();
    if tree.categories.is_empty() {
        out.push_str("No endpoints match the search.\n");
        return out;
    }

    for category in &tree.categories {
        let marker = if category.expanded { EXPANDED } else { COLLAPSED };
        let _ = writeln!(out, "{} [{}] {} ({})", marker, category.index, category.name, category.count_label);
        if !category.description.is_empty() {
            let _ = writeln!(out, "    {}", category.description);
        }
        for endpoint in &category.endpoints {
            paint_endpoint(&mut out, endpoint);
        }
    }
    out
}

fn paint_endpoint(out: &mut String, endpoint: &EndpointView) {
    let marker = if endpoint.expanded { EXPANDED } else { COLLAPSED };
    let auth = if endpoint.requires_auth { "  [auth]" } else { "" };
    let _ = writeln!(
        out,
        "  {} {}:{} {:<7} {}  {}{}",
        marker,
        endpoint.id.category,
        endpoint.id.endpoint,
        endpoint.method.as_str(),
        endpoint.path,
        endpoint.description,
        auth
    );
    if let Some(details) = &endpoint.details {
        paint_details(out, details);
    }
}

fn paint_details(out: &mut String, details: &EndpointDetails) {
    let _ = writeln!(out, "      URL: {}", details.full_url);
    if let Some(roles) = &details.roles {
        let _ = writeln!(out, "      Roles: {}", roles.join(", "));
    }
    if let Some(content_type) = &details.content_type {
        let _ = writeln!(out, "      Content-Type: {}", content_type);
    }
    for (label, block) in [
        ("Body", &details.body),
        ("Query params", &details.query_params),
        ("Response", &details.response),
    ] {
        if let Some(block) = block {
            let _ = writeln!(out, "      {}:", label);
            indent_block(out, block);
        }
    }
    let _ = writeln!(out, "      Example:");
    indent_block(out, &details.command);
}

fn indent_block(out: &mut String, block: &str) {
    for line in block.lines() {
        let _ = writeln!(out, "        {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::view_tree::{EndpointId, Renderer};
    use crate::test_support::auth_admin_catalog;

    #[test]
    fn paints_markers_badges_and_details() {
        let catalog = auth_admin_catalog();
        let mut renderer = Renderer::new();
        renderer.reset_for_new_catalog();
        renderer.toggle_category(1);
        renderer.toggle_endpoint(EndpointId::new(1, 0));

        let text = paint(&renderer.render(&catalog));

        assert!(text.contains("▾ [0] Auth (1 endpoint)"));
        assert!(text.contains("▾ [1] Admin (1 endpoint)"));
        assert!(text.contains("GET     /stats  Get stats  [auth]"));
        assert!(text.contains("      URL: http://localhost:3000/api/stats"));
        assert!(text.contains("      Roles: admin"));
        assert!(text.contains("        curl -X GET \"http://localhost:3000/api/stats\" \\"));
        assert!(text.contains("\"appointments\": 340"));
    }

    #[test]
    fn empty_tree_says_so() {
        let tree = ViewTree {
            base_url: String::new(),
            total_endpoints: 0,
            categories: vec![],
        };
        assert_eq!(paint(&tree), "No endpoints match the search.\n");
    }
}
