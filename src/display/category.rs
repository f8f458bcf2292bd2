//! Category display formatting

use crate::models::ServiceCategory;

/// Categories with their provider counts
pub fn format_category_list(counts: &[(ServiceCategory, usize)]) -> String {
    if counts.is_empty() {
        return "No categories found. Run 'servicehub init' to seed the catalog.".to_string();
    }

    let name_width = counts
        .iter()
        .map(|(c, _)| c.name.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "   {:<name_width$}  {:>9}  {}\n",
        "Category",
        "Providers",
        "Description",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "   {:-<name_width$}  {:->9}  {:-<11}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (category, count) in counts {
        output.push_str(&format!(
            "{:<2} {:<name_width$}  {:>9}  {}\n",
            category.icon,
            category.name,
            count,
            category.description,
            name_width = name_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DefaultCategory;

    #[test]
    fn test_format_list() {
        let counts = vec![
            (DefaultCategory::Plumbing.to_category(0), 2),
            (DefaultCategory::Tutoring.to_category(1), 0),
        ];
        let output = format_category_list(&counts);
        assert!(output.contains("Plumbing"));
        assert!(output.contains("Tutoring"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[]).starts_with("No categories"));
    }
}
