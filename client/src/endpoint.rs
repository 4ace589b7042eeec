use core::fmt;
use std::ops::Add;

use url::Url;

const SEP: char = '/';

/// API endpoint builder rooted at the server base URI.
///
/// Appending keeps a trailing slash when the appended path carries one,
/// which the upload and delete routes require.
#[derive(Clone)]
pub struct Endpoint {
    url: Url,
}

impl Endpoint {
    #[must_use]
    pub fn new(uri: &str) -> Option<Endpoint> {
        let base = Url::parse(uri).ok()?;
        Some(Endpoint { url: base })
    }

    pub fn append_path(&mut self, path: &str) -> &mut Self {
        if let Some(segments) = self.url.path_segments() {
            let p = segments
                .chain(path.split(SEP))
                .filter(|x| !x.is_empty())
                .fold(String::new(), |s, x| {
                    let mut y = s.add(x);
                    y.push(SEP);
                    y
                });

            let path_to_set = if path.chars().next_back().unwrap_or_default() == SEP {
                &p
            } else {
                &p[..p.len() - 1]
            };
            self.url.set_path(path_to_set);
        } else {
            let r = self.url.join(path);
            if let Ok(u) = r {
                self.url = u;
            }
        }
        self
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_correct_some() {
        // Arrange

        // Act
        let e = Endpoint::new("http://localhost:5000");

        // Assert
        assert!(e.is_some());
    }

    #[test]
    fn new_incorrect_none() {
        // Arrange

        // Act
        let e = Endpoint::new("http/localhost");

        // Assert
        assert!(e.is_none());
    }

    #[rstest]
    #[case("http://localhost:5000", "api/upload/", "http://localhost:5000/api/upload/")]
    #[case("http://localhost:5000/", "api/upload/", "http://localhost:5000/api/upload/")]
    #[case(
        "http://localhost:5000",
        "api/delete/3/",
        "http://localhost:5000/api/delete/3/"
    )]
    #[case("http://localhost:5000", "api/upload", "http://localhost:5000/api/upload")]
    #[case("http://media.example.com/store", "api/upload/", "http://media.example.com/store/api/upload/")]
    #[trace]
    fn append_path_tests(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        // Arrange
        let mut e = Endpoint::new(base).unwrap();

        // Act
        e.append_path(path);

        // Assert
        assert_eq!(e.to_string().as_str(), expected);
    }

    #[test]
    fn append_path_twice() {
        // Arrange
        let mut e = Endpoint::new("http://localhost:5000").unwrap();

        // Act
        e.append_path("api").append_path("delete/5/");

        // Assert
        assert_eq!(e.to_string().as_str(), "http://localhost:5000/api/delete/5/");
    }
}
