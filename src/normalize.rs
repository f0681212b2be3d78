// src/normalize.rs
// =============================================================================
// URL normalization: drop the fragment (#...) and query string (?...).
//
// Two links that only differ in their fragment or query parameters point at
// the same resource as far as reachability goes, so we check them once.
//
// No URL parsing happens here. Whatever text comes in, a prefix of it comes
// out - malformed strings pass through untouched apart from the cut.
// =============================================================================

// Strips everything from the first '#' and then everything from the first '?'
//
// Examples:
//   "https://a.com/x#frag"     -> "https://a.com/x"
//   "https://a.com/x?q=1#frag" -> "https://a.com/x"
//   "#top"                     -> ""
//
// Returns a slice of the input, so no allocation happens.
pub fn normalize(url: &str) -> &str {
    // split_once cuts on the first match only
    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);

    without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head)
}
