/// Derives a url slug from a job title: lowercased, every whitespace run
/// collapsed into a single hyphen. An empty title yields an empty slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut chars = title.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch.is_whitespace() {
            slug.push('-');
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
        } else {
            slug.extend(ch.to_lowercase());
        }
    }
    slug
}
