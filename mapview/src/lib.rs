//! Pan/zoom viewport and hotspot engine for interactive image maps.
//!
//! The crate owns everything between raw input events and what the page
//! shows: the viewport transform (scale + offset) of an image inside a fixed
//! container, conversions between screen pixels and normalized image
//! percentages, the ordered hotspot list, and its JSON/CSV transport formats.
//! The host layer (a browser binding or any other UI) is responsible only for
//! wiring events to [`engine::EngineCore`] and acting on the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editor/viewer engine and the browser-bound [`engine::Engine`] |
//! | [`viewport`] | Viewport state and the pan/zoom/gesture controller |
//! | [`coords`] | Screen <-> normalized coordinate mapping |
//! | [`input`] | Input event types and the marker drag state machine |
//! | [`hotspot`] | Hotspot records and the ordered hotspot model |
//! | [`csv`] | CSV export/import of hotspot lists |
//! | [`map`] | Persistence wire types shared with the service and CLI |
//! | [`hit`] | Hit-testing screen points against hotspot markers |
//! | [`render`] | Render scene (transform + markers) and DOM application |
//! | [`consts`] | Shared numeric constants (zoom limits, factors, defaults) |

pub mod consts;
pub mod coords;
pub mod csv;
pub mod engine;
pub mod hit;
pub mod hotspot;
pub mod input;
pub mod map;
pub mod render;
pub mod viewport;
