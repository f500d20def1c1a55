use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::now_ms;

/// Who left an echo on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EchoAuthor {
    User,
    Agent,
}

/// A spatially placed, author-tagged text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub id: Uuid,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub author: EchoAuthor,
    pub created_at: i64,
}

/// Visible canvas area, used to place echoes that arrive without
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// The set of echoes pinned to the canvas.
///
/// Grows only by explicit additions and shrinks only by explicit
/// deletion; there is no eviction and no timeout. Unbounded growth over
/// a very long session is accepted scope.
#[derive(Debug, Clone, Default)]
pub struct EchoField {
    echoes: Vec<Echo>,
    viewport: Viewport,
}

impl EchoField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            echoes: Vec::new(),
            viewport,
        }
    }

    /// Add an echo. Missing coordinates are filled with a pseudo-random
    /// position inside the visible margins.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        author: EchoAuthor,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Uuid {
        let (sx, sy) = self.scatter();
        let echo = Echo {
            id: Uuid::new_v4(),
            text: text.into(),
            x: x.unwrap_or(sx),
            y: y.unwrap_or(sy),
            author,
            created_at: now_ms(),
        };
        let id = echo.id;
        self.echoes.push(echo);
        id
    }

    /// Remove an echo. Unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.echoes.len();
        self.echoes.retain(|echo| echo.id != id);
        self.echoes.len() != before
    }

    pub fn get(&self, id: Uuid) -> Option<&Echo> {
        self.echoes.iter().find(|echo| echo.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Echo> {
        self.echoes.iter()
    }

    pub fn len(&self) -> usize {
        self.echoes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.echoes.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // 120px margin on each side, 200px extra clearance on the far edge
    // so a note never hugs the border.
    fn scatter(&self) -> (f64, f64) {
        let mut rng = rand::thread_rng();
        let span_x = (self.viewport.width - 320.0).max(1.0);
        let span_y = (self.viewport.height - 320.0).max(1.0);
        (
            120.0 + rng.r#gen::<f64>() * span_x,
            120.0 + rng.r#gen::<f64>() * span_y,
        )
    }
}
