//! Hammer cursor that follows the mouse over the page.

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::error::{GameError, Result};

const HAMMER_STYLE: &str = "position: fixed; font-size: 30px; pointer-events: none; \
     z-index: 9999; transform: translate(-50%, -50%);";

pub fn install_hammer_cursor(doc: &Document) -> Result<()> {
    let body = doc.body().ok_or(GameError::MissingElement("body"))?;
    let cursor: HtmlElement = doc
        .create_element("div")?
        .dyn_into()
        .map_err(|_| GameError::Js("cursor is not an HtmlElement".into()))?;
    cursor.set_inner_html("🔨");
    cursor.style().set_css_text(HAMMER_STYLE);
    body.append_child(&cursor)?;

    let follow = cursor.clone();
    EventListener::new(doc, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let style = follow.style();
            style.set_property("left", &format!("{}px", mouse.client_x())).ok();
            style.set_property("top", &format!("{}px", mouse.client_y())).ok();
        }
    })
    .forget();

    // Hide the system pointer over the grid only; menus keep the normal one.
    if let Some(grid) = doc
        .query_selector(".grid")?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        grid.style().set_property("cursor", "none")?;
    }
    Ok(())
}
