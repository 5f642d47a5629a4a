//! Getting exports out of the app and file names into forms.
//!
//! - **Native**: `rfd` save/open dialogs, written with `std::fs`. The printable
//!   page is then opened in the default browser.
//! - **Web (WASM)**: a Blob URL clicked through a hidden anchor for downloads,
//!   and opened in a new tab for the printable view. Picking files is not
//!   supported; file fields are typed by hand.
//!
//! The printable page calls `window.print()` once loaded.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    #[cfg(not(target_arch = "wasm32"))]
    Saved(PathBuf),
    /// Handed to the browser.
    Browser,
    /// The user dismissed the dialog.
    Cancelled,
}

impl Delivery {
    /// Status line for the toolbar, `None` when there is nothing to say.
    pub fn notice(&self, what: &str) -> Option<String> {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            Self::Saved(path) => Some(format!("{what} saved to {}", path.display())),
            Self::Browser => Some(format!("{what} opened in the browser")),
            Self::Cancelled => None,
        }
    }
}

/// Offers `csv` for download as `file_name`.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_csv(file_name: &str, csv: &str) -> Result<Delivery, String> {
    save_with_dialog(file_name, "CSV", "csv", csv)
}

/// Saves the printable page and opens it in the default browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn show_printable(file_name: &str, html: &str) -> Result<Delivery, String> {
    let delivery = save_with_dialog(file_name, "HTML", "html", html)?;
    if let Delivery::Saved(path) = &delivery
        && let Err(err) = open::that(path)
    {
        // Still saved; the user can open it by hand.
        log::warn!("could not open {} in a browser: {err}", path.display());
    }
    Ok(delivery)
}

/// File name chosen in an open dialog.
#[cfg(not(target_arch = "wasm32"))]
pub fn pick_file_name() -> Option<String> {
    let path = rfd::FileDialog::new().pick_file()?;
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(not(target_arch = "wasm32"))]
fn save_with_dialog(
    file_name: &str,
    filter: &str,
    extension: &str,
    contents: &str,
) -> Result<Delivery, String> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(file_name)
        .add_filter(filter, &[extension])
        .save_file()
    else {
        log::debug!("save dialog for {file_name} dismissed");
        return Ok(Delivery::Cancelled);
    };

    std::fs::write(&path, contents)
        .map_err(|err| format!("could not write {}: {err}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(Delivery::Saved(path))
}

#[cfg(target_arch = "wasm32")]
pub fn save_csv(file_name: &str, csv: &str) -> Result<Delivery, String> {
    use wasm_bindgen::JsCast as _;

    let url = object_url(csv, "text/csv;charset=utf-8")?;
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "no document".to_owned())?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(js_error)?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    DOWNLOAD_URL.with_borrow_mut(|slot| revoke(slot.replace(url)));
    Ok(Delivery::Browser)
}

#[cfg(target_arch = "wasm32")]
pub fn show_printable(_file_name: &str, html: &str) -> Result<Delivery, String> {
    let url = object_url(html, "text/html;charset=utf-8")?;
    let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
    window
        .open_with_url_and_target(&url, "_blank")
        .map_err(js_error)?;
    PRINT_URL.with_borrow_mut(|slot| revoke(slot.replace(url)));
    Ok(Delivery::Browser)
}

/// Holds the object URL of the latest export of one kind. The browser may
/// still be reading it after `click()`/`open()` return, so it is only revoked
/// once the next export of the same kind replaces it.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug, Default)]
struct UrlSlot(Option<String>);

#[cfg(any(target_arch = "wasm32", test))]
impl UrlSlot {
    /// Stores `url` and hands back the one it replaces, now safe to revoke.
    fn replace(&mut self, url: String) -> Option<String> {
        self.0.replace(url)
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static DOWNLOAD_URL: std::cell::RefCell<UrlSlot> = std::cell::RefCell::default();
    static PRINT_URL: std::cell::RefCell<UrlSlot> = std::cell::RefCell::default();
}

#[cfg(target_arch = "wasm32")]
fn revoke(stale: Option<String>) {
    if let Some(url) = stale
        && let Err(err) = web_sys::Url::revoke_object_url(&url)
    {
        log::debug!("revoking {url}: {err:?}");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn pick_file_name() -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
fn object_url(contents: &str, mime: &str) -> Result<String, String> {
    let parts = web_sys::js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob =
        web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)
}

#[cfg(target_arch = "wasm32")]
fn js_error(value: impl std::fmt::Debug) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissed_dialog_says_nothing() {
        assert_eq!(Delivery::Cancelled.notice("Export"), None);
    }

    #[test]
    fn object_urls_are_released_one_export_later() {
        let mut slot = UrlSlot::default();
        assert_eq!(slot.replace("blob:first".to_owned()), None);
        assert_eq!(
            slot.replace("blob:second".to_owned()).as_deref(),
            Some("blob:first")
        );
    }

    #[test]
    fn browser_delivery_notice() {
        assert_eq!(
            Delivery::Browser.notice("Export").as_deref(),
            Some("Export opened in the browser")
        );
    }
}
