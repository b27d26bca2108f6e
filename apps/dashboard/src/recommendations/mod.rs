// Dashboard request flow: extract → fetch → rank → filter.
// Each request runs the stages in order; nothing is kept between requests.

pub mod handlers;
pub mod pipeline;
