pub mod conversation_service;
pub mod destination_scoring;
pub mod gemini_service;
pub mod planner_service;
pub mod qloo_service;
