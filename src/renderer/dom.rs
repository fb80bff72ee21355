//! DOM rendering
//!
//! Positions the `.ball` and `.paddle` elements inside the `.game` container
//! with absolute `left`/`top` styles, one arena unit per CSS pixel.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::host::{Frame, Renderer};
use crate::sim::{Score, SessionState, Side};

pub struct DomRenderer {
    ball: HtmlElement,
    left: HtmlElement,
    right: HtmlElement,
    left_score: Option<Element>,
    right_score: Option<Element>,
    status: Option<Element>,
    /// HUD values last written, to skip redundant text updates
    last_hud: Option<(Score, SessionState, Option<Side>)>,
}

fn html_element(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn place(el: &HtmlElement, property: &str, value: f32) {
    let _ = el.style().set_property(property, &format!("{value}px"));
}

impl DomRenderer {
    /// Look up the game elements; `None` if the page lacks the ball or a paddle
    pub fn new(document: &Document) -> Option<Self> {
        let ball = html_element(document, ".game .ball")?;
        let left = html_element(document, ".game .paddle.left")?;
        let right = html_element(document, ".game .paddle.right")?;

        Some(Self {
            ball,
            left,
            right,
            left_score: document.get_element_by_id("score-left"),
            right_score: document.get_element_by_id("score-right"),
            status: document.get_element_by_id("status"),
            last_hud: None,
        })
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, frame: &Frame) {
        place(&self.ball, "left", frame.ball.x);
        place(&self.ball, "top", frame.ball.y);
        place(&self.left, "top", frame.left_y);
        place(&self.right, "top", frame.right_y);

        let hud = (frame.score, frame.session, frame.winner);
        if self.last_hud == Some(hud) {
            return;
        }
        self.last_hud = Some(hud);

        if let Some(el) = &self.left_score {
            el.set_text_content(Some(&frame.score.left.to_string()));
        }
        if let Some(el) = &self.right_score {
            el.set_text_content(Some(&frame.score.right.to_string()));
        }
        if let Some(el) = &self.status {
            el.set_text_content(Some(frame.status()));
        }
    }
}
