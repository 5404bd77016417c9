//! Absolute URLs for product and achievement images.
//!
//! Image files are served under `/static` by whatever fronts the API; the
//! handlers only render links to them from the request's scheme and host.

use actix_web::HttpRequest;

/// Directory under `/static` holding one kind of image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Product,
    Achievement,
}

impl ImageKind {
    fn directory(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Achievement => "achievements",
        }
    }
}

/// Render `{scheme}://{host}/static/{dir}/{file}` for `req`.
pub fn image_url(req: &HttpRequest, kind: ImageKind, file: &str) -> String {
    let info = req.connection_info();
    format!(
        "{}://{}/static/{}/{}",
        info.scheme(),
        info.host(),
        kind.directory(),
        file
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(ImageKind::Product, "mug.png", "http://ideas.test/static/products/mug.png")]
    #[case(
        ImageKind::Achievement,
        "first.svg",
        "http://ideas.test/static/achievements/first.svg"
    )]
    fn renders_absolute_urls(#[case] kind: ImageKind, #[case] file: &str, #[case] expected: &str) {
        let req = TestRequest::default()
            .insert_header(("host", "ideas.test"))
            .to_http_request();
        assert_eq!(image_url(&req, kind, file), expected);
    }
}
