//! 服务层 - 业务流程
//!
//! # 服务列表
//!
//! - [`SeatingService`] - 桌台、预订、候位与看板

pub mod seating;

pub use seating::SeatingService;
