use std::collections::HashSet;

use super::Scene;
use super::SceneId;
use super::Thumbnail;
use crate::domain::models::AspectRatio;
use crate::domain::models::GeneratedImage;
use crate::domain::models::ImageDataUri;
use crate::domain::models::ImageSlot;

fn image(aspect_ratio: AspectRatio) -> GeneratedImage {
    return GeneratedImage {
        url: ImageDataUri::new("image/png", "abc"),
        aspect_ratio,
    };
}

#[test]
fn it_mints_unique_ids() {
    let ids = (0..1000)
        .map(|_| return SceneId::new())
        .collect::<HashSet<SceneId>>();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn it_creates_scenes_without_images() {
    let scene = Scene::new(1, "A wide shot of a garden");
    assert_eq!(scene.index, 1);
    assert_eq!(scene.prompt, "A wide shot of a garden");
    assert_eq!(scene.image, ImageSlot::Empty);
    assert!(scene.image_url().is_none());
    assert!(!scene.is_generating_image());
}

#[test]
fn it_numbers_batches_after_existing_scenes() {
    let prompts = vec!["one".to_string(), "two".to_string(), "three".to_string()];

    let fresh = Scene::batch(&prompts, 0);
    assert_eq!(
        fresh.iter().map(|s| return s.index).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let more = Scene::batch(&prompts, 3);
    assert_eq!(
        more.iter().map(|s| return s.index).collect::<Vec<_>>(),
        vec![4, 5, 6]
    );
    assert_eq!(more[0].prompt, "one");
}

#[test]
fn it_exposes_image_urls() {
    let mut scene = Scene::new(2, "prompt");
    scene.image = ImageSlot::Ready(image(AspectRatio::Widescreen));
    assert_eq!(scene.image_url(), Some("data:image/png;base64,abc".to_string()));
    assert!(!scene.is_generating_image());
}

#[test]
fn it_names_downloads() {
    let scene = Scene::new(3, "prompt");
    insta::assert_snapshot!(scene.file_name(&image(AspectRatio::Widescreen)), @"scene-3-16x9.png");
    insta::assert_snapshot!(Thumbnail::file_name(&image(AspectRatio::Portrait)), @"thumbnail-3x4.png");
}
