use async_trait::async_trait;
use image::DynamicImage;

use crate::error::AnalysisError;

/// Seam to the remote vision model. The orchestrator only depends on getting
/// one text blob back for an image; the wire format behind this is the
/// provider's business.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    async fn analyze_food(&self, image: &DynamicImage) -> Result<String, AnalysisError>;

    fn clone_box(&self) -> Box<dyn VisionProvider + Send + Sync>;
}

impl Clone for Box<dyn VisionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
