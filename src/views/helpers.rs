use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};

pub const COVER_URL_HELPER_NAME: &str = "coverUrl";

const COVER_URL_BASE: &str = "https://covers.openlibrary.org/b/isbn";

/// Open Library cover image (medium size) for an ISBN. The ISBN is used as-is.
pub fn cover_url(isbn: &str) -> String {
    format!("{COVER_URL_BASE}/{isbn}-M.jpg")
}

pub fn register_helpers(handlebars_registry: &mut Handlebars) {
    handlebars_registry.register_helper(COVER_URL_HELPER_NAME, Box::new(cover_url_helper));
}

fn cover_url_helper(
    h: &Helper,
    r: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .map(handlebars::PathAndJson::value)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(
            COVER_URL_HELPER_NAME,
            0,
        ))?;
    let isbn = param
        .as_str()
        .map_or_else(|| param.to_string(), str::to_string);

    out.write(&r.get_escape_fn()(&cover_url(&isbn)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cover_url_interpolates_isbn() {
        assert_eq!(
            cover_url("9780140449136"),
            "https://covers.openlibrary.org/b/isbn/9780140449136-M.jpg"
        );
        assert_eq!(cover_url(""), "https://covers.openlibrary.org/b/isbn/-M.jpg");
    }

    #[test]
    fn helper_renders_escaped_url() {
        let mut hb = Handlebars::new();
        register_helpers(&mut hb);

        let out = hb
            .render_template("{{coverUrl isbn}}", &json!({ "isbn": "111" }))
            .expect("render");
        assert_eq!(out, "https://covers.openlibrary.org/b/isbn/111-M.jpg");

        let out = hb
            .render_template("{{coverUrl isbn}}", &json!({ "isbn": "1\"2<" }))
            .expect("render");
        assert!(!out.contains('"') && !out.contains('<'));
    }
}
