pub mod group_queries;
pub mod feed_queries;
