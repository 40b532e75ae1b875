pub mod intersection;
pub mod item;
pub mod layout;
pub mod observer;
pub mod point;
pub mod point_axis;
pub mod track;
pub mod types;

pub use intersection::{has_intersection, ranges_intersect};
pub use item::{ItemId, TrackItem};
pub use layout::{AnyLine, GroupByName, LayoutMode, LayoutReport, TopLine, TrackLayout};
pub use observer::{SubscriptionId, TrackEvent, TrackObserver};
pub use point::{AxisDomain, DateDomain, DurationDomain, IndexDomain};
pub use point_axis::{AxisAlignment, AxisWindow, PointAxis};
pub use track::Track;
pub use types::{PaneRect, PointerEvent, Vec2, Viewport};
