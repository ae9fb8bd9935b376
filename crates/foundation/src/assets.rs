use crate::ids::ExpeditionId;
use crate::palette::Color;

/// URL of an expedition image in the collaborator's static-asset scheme:
/// `<base>/images/<expedition>/<sequence>/<file>`.
///
/// The scheme is fixed by the data store and documented here for
/// compatibility only.
pub fn image_path(base: &str, expedition: ExpeditionId, sequence: u32, file_name: &str) -> String {
    format!(
        "{}/images/{expedition}/{sequence}/{file_name}",
        base.trim_end_matches('/')
    )
}

/// Relative path of the marker icon for a palette color,
/// e.g. `"markers/a93226.svg"` for `"#a93226"`.
pub fn icon_file_name(color: Color) -> String {
    format!("markers/{}.svg", color.trim_start_matches('#'))
}

#[cfg(test)]
mod tests {
    use super::{icon_file_name, image_path};
    use crate::ids::ExpeditionId;

    #[test]
    fn image_path_joins_scheme() {
        let url = image_path("http://example.org", ExpeditionId(3), 2, "camp.jpg");
        assert_eq!(url, "http://example.org/images/3/2/camp.jpg");
    }

    #[test]
    fn image_path_tolerates_trailing_slash() {
        let url = image_path("http://example.org/", ExpeditionId(3), 2, "camp.jpg");
        assert_eq!(url, "http://example.org/images/3/2/camp.jpg");
    }

    #[test]
    fn icon_name_strips_hash() {
        assert_eq!(icon_file_name("#34495e"), "markers/34495e.svg");
    }
}
