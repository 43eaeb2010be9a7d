//! Mock caption generator, used when no external caption API is configured.

use async_trait::async_trait;

use crate::{Caption, CaptionError, CaptionGenerator};

const MOCK_CAPTIONS: [&str; 10] = [
    "When you realize it's only Tuesday",
    "Me pretending to understand the assignment",
    "POV: You just checked your bank account",
    "When someone says 'we need to talk'",
    "My last brain cell during finals week",
    "When the WiFi disconnects mid-submit",
    "Trying to adult but failing spectacularly",
    "When you see your professor outside of class",
    "My motivation at 2am vs 2pm",
    "When the group project partner finally responds",
];

/// Fallback generator returning a fixed ten-entry list.
///
/// When a context is supplied, the first two entries are rewritten around it;
/// the rest stay constant.
pub struct MockCaptioner;

impl MockCaptioner {
    pub fn captions_for(context: Option<&str>) -> Vec<Caption> {
        let mut texts: Vec<String> = MOCK_CAPTIONS.iter().map(|s| s.to_string()).collect();

        if let Some(context) = context {
            texts[0] = format!("{}: expectations vs reality", context);
            texts[1] = format!("When {} hits different", context.to_lowercase());
        }

        texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Caption {
                id: index as u32 + 1,
                text,
            })
            .collect()
    }
}

#[async_trait]
impl CaptionGenerator for MockCaptioner {
    async fn generate(
        &self,
        _image_url: &str,
        context: Option<&str>,
    ) -> Result<Vec<Caption>, CaptionError> {
        Ok(Self::captions_for(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_ten_captions_with_sequential_ids() {
        let captions = MockCaptioner::captions_for(None);
        assert_eq!(captions.len(), 10);
        for (index, caption) in captions.iter().enumerate() {
            assert_eq!(caption.id, index as u32 + 1);
        }
        assert_eq!(captions[0].text, "When you realize it's only Tuesday");
        assert_eq!(captions[1].text, "Me pretending to understand the assignment");
    }

    #[test]
    fn test_context_rewrites_first_two_entries() {
        let captions = MockCaptioner::captions_for(Some("Monday"));
        assert_eq!(captions[0].text, "Monday: expectations vs reality");
        assert_eq!(captions[1].text, "When monday hits different");

        let plain = MockCaptioner::captions_for(None);
        for index in 2..10 {
            assert_eq!(captions[index].text, plain[index].text);
        }
    }

    #[tokio::test]
    async fn test_generate_ignores_image_url() {
        let captions = MockCaptioner
            .generate("https://example.com/image.png", None)
            .await
            .unwrap();
        assert_eq!(captions.len(), 10);
    }
}
