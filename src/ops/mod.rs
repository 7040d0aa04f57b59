pub mod group_ops;
pub mod participant_ops;
pub mod draw_ops;
pub mod feed_ops;
