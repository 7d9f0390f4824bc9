pub mod conversation;
pub mod destination;
pub mod interests;
pub mod numeric;
pub mod object_id;
pub mod recommendations;
pub mod travel_plan;
