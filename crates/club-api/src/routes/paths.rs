//! Local URL builders for redirects

use url::form_urlencoded;

pub const HOME: &str = "/";
pub const FEED: &str = "/feed/";
pub const LOG_IN: &str = "/log_in/";
pub const PROFILE: &str = "/profile/";
pub const CLUBS: &str = "/clubs/";

/// `/log_in/?next=<path>`; `path` is an already-encoded request path
pub fn log_in_with_next(path: &str) -> String {
    format!("{LOG_IN}?next={path}")
}

/// `/applicants/<club>/`
pub fn applicants(club_name: &str) -> String {
    format!("/applicants/{}/", encode_segment(club_name))
}

/// `/club/<club>/member_management/`
pub fn member_management(club_name: &str) -> String {
    format!("/club/{}/member_management/", encode_segment(club_name))
}

/// Percent-encode one path segment (spaces as `%20`, not `+`)
fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_club_paths() {
        assert_eq!(applicants("Beatles"), "/applicants/Beatles/");
        assert_eq!(
            member_management("Beatles"),
            "/club/Beatles/member_management/"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(applicants("Abbey Road"), "/applicants/Abbey%20Road/");
        assert_eq!(applicants("C++ & co"), "/applicants/C%2B%2B%20%26%20co/");
        assert_eq!(applicants("a/b"), "/applicants/a%2Fb/");
    }

    #[test]
    fn test_log_in_with_next() {
        assert_eq!(
            log_in_with_next("/applicants/Beatles/"),
            "/log_in/?next=/applicants/Beatles/"
        );
    }
}
