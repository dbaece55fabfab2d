// Form controller: one endpoint per panel of the hiring assistant.
// Each request runs its pipeline inline: extract → prompt → chat → parse → classify.

pub mod handlers;
pub mod upload;
