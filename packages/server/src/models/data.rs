use serde::Serialize;

/// Sizes of the collections that replaced the previous contents.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImportResponse {
    #[schema(example = 4)]
    pub providers: usize,
    #[schema(example = 11)]
    pub deployments: usize,
    #[schema(example = 4)]
    pub challenges: usize,
}
