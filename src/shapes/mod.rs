mod convex_hull;

pub use self::convex_hull::ConvexHull;
