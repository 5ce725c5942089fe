/// Minimum total rewards for `ratings`, where everyone gets at least one
/// reward and anyone rated above an adjacent neighbour gets more than them.
///
/// Two passes: left-to-right enforces the left-neighbour rule, right-to-left
/// takes the maximum against the right-neighbour rule so neither pass undoes
/// the other.
pub fn min_rewards(ratings: &[i32]) -> u64 {
    let n = ratings.len();
    if n == 0 {
        return 0;
    }

    let mut rewards = vec![1u64; n];
    for i in 1..n {
        if ratings[i] > ratings[i - 1] {
            rewards[i] = rewards[i - 1] + 1;
        }
    }
    for i in (0..n - 1).rev() {
        if ratings[i] > ratings[i + 1] {
            rewards[i] = rewards[i].max(rewards[i + 1] + 1);
        }
    }
    rewards.iter().sum()
}
