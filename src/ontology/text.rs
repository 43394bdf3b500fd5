//! Text normalization and similarity scoring for label search

/// Lowercase, map non-alphanumerics to spaces, collapse whitespace, trim
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Tokens of an already normalized string
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|t| !t.is_empty())
}

/// Levenshtein distance over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `1 - distance / max_len`, in `[0, 1]`
pub fn edit_similarity(query: &str, candidate: &str) -> f64 {
    let max_len = query.chars().count().max(candidate.chars().count());
    if max_len == 0 {
        return 0.0;
    }
    1.0 - levenshtein(query, candidate) as f64 / max_len as f64
}

/// Average over query tokens of the best match among candidate tokens
///
/// An exact token match counts 1; a candidate token that starts with the
/// query token counts `len(query_token) / len(candidate_token)`.
pub fn token_set(query: &str, candidate: &str) -> f64 {
    let candidate_tokens: Vec<&str> = tokens(candidate).collect();
    let mut total = 0.0;
    let mut count = 0usize;

    for q in tokens(query) {
        count += 1;
        let q_len = q.chars().count() as f64;
        let best = candidate_tokens
            .iter()
            .map(|c| {
                if *c == q {
                    1.0
                } else if c.starts_with(q) {
                    q_len / c.chars().count() as f64
                } else {
                    0.0
                }
            })
            .fold(0.0, f64::max);
        total += best;
    }

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// `0.5 + 0.5 * len(query) / len(candidate)` when the candidate starts with the query
pub fn prefix_score(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || !candidate.starts_with(query) {
        return 0.0;
    }
    0.5 + 0.5 * query.chars().count() as f64 / candidate.chars().count() as f64
}

/// Label similarity of two normalized strings, in `[0, 1]`
pub fn label_score(query: &str, candidate: &str) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let blend = 0.5 * token_set(query, candidate) + 0.5 * edit_similarity(query, candidate);
    prefix_score(query, candidate).max(blend).clamp(0.0, 1.0)
}
