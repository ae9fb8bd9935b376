/// Renders `n` with its English ordinal suffix ("1st", "2nd", "3rd",
/// "4th", ...), including the 11/12/13 exception.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, k) if k != 11 => "st",
        (2, k) if k != 12 => "nd",
        (3, k) if k != 13 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
