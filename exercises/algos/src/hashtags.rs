use std::collections::HashMap;

/// The exercise's fixed seven-post sample.
pub const SAMPLE_POSTS: [&str; 7] = [
    "Enjoying a great start to the day. #HappyDay #MorningVibes",
    "Another #HappyDay with good vibes! #FeelGood",
    "Productivity peaks! #WorkLife #ProductiveDay",
    "Exploring new tech frontiers. #TechLife #Innovation",
    "Gratitude for today's moments. #HappyDay #Thankful",
    "Innovation drives us. #TechLife #FutureTech",
    "Connecting with nature's serenity. #Nature #Peaceful",
];

/// Top `k` hashtags by mention count, descending; equal counts are ordered
/// by ascending tag. A hashtag is any whitespace-split token starting
/// with `#`.
pub fn top_hashtags(posts: &[&str], k: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for token in post.split_whitespace() {
            if token.starts_with('#') {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}
