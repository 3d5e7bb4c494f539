use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use h2o_core::AiSettings;

const IMAGES_ENDPOINT: &str = "https://api.openai.com/v1/images/generations";

#[derive(Serialize)]
struct CreateImageRequest<'a> {
    prompt: &'a str,
    n: u32,
    size: &'a str,
    model: &'a str,
}

#[derive(Deserialize)]
struct CreateImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: String,
}

/// Generate one image for a prompt and cache it on disk under the image
/// directory. Returns the saved path. A single attempt; any failure is
/// terminal for this submission.
pub async fn generate_visual(settings: &AiSettings, prompt: &str) -> Result<PathBuf, String> {
    let client = reqwest::Client::new();

    let request = CreateImageRequest {
        prompt,
        n: 1,
        size: &settings.image_size,
        model: &settings.image_model,
    };

    eprintln!("[h2o-advisor] requesting image via {}", settings.image_model);

    let response = client
        .post(IMAGES_ENDPOINT)
        .bearer_auth(&settings.api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("image request: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("image endpoint returned {}", response.status()));
    }

    let parsed: CreateImageResponse = response
        .json()
        .await
        .map_err(|e| format!("decode image response: {e}"))?;
    let url = parsed
        .data
        .first()
        .map(|d| d.url.as_str())
        .ok_or_else(|| "no image URL returned".to_string())?;

    let dir = h2o_core::images_dir();
    fs::create_dir_all(&dir).map_err(|e| format!("create {}: {e}", dir.display()))?;
    let path = dir.join(h2o_core::filename_from_prompt(prompt));

    download_image(&client, url, &path).await?;
    eprintln!("[h2o-advisor] image saved to {}", path.display());
    Ok(path)
}

/// Fetch the generated image over plain HTTP and write it into the cache.
async fn download_image(client: &reqwest::Client, url: &str, path: &Path) -> Result<(), String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("download image: {e}"))?;
    if !response.status().is_success() {
        return Err(format!("image download returned {}", response.status()));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| format!("read image bytes: {e}"))?;
    fs::write(path, &bytes).map_err(|e| format!("write {}: {e}", path.display()))
}
