use super::model::{Catalog, Category, Track};

fn track(
    id: u32,
    title: &str,
    description: &str,
    duration: &str,
    category: Category,
    source: &str,
) -> Track {
    Track {
        id,
        title: title.to_string(),
        description: description.to_string(),
        category,
        duration_label: duration.to_string(),
        source: source.to_string(),
    }
}

fn builtin_tracks() -> Vec<Track> {
    use Category::*;

    vec![
        track(
            1,
            "Deep Relaxation",
            "Gentle sounds to help you relax deeply",
            "10:00",
            Meditation,
            "https://cdn.pixabay.com/audio/2023/08/31/audio_303ccd15ad.mp3",
        ),
        track(
            2,
            "Stress Relief",
            "Release tension with calming sounds",
            "8:00",
            Meditation,
            "https://cdn.pixabay.com/audio/2022/03/10/audio_c968815a28.mp3",
        ),
        track(
            3,
            "Ocean Waves",
            "Gentle waves to calm your mind",
            "15:00",
            Nature,
            "https://cdn.pixabay.com/audio/2021/09/06/audio_968bd2d883.mp3",
        ),
        track(
            4,
            "Forest Sounds",
            "Immerse in peaceful forest ambience",
            "12:00",
            Nature,
            "https://cdn.pixabay.com/audio/2022/05/16/audio_94fc8b5904.mp3",
        ),
        track(
            5,
            "Gentle Rain",
            "Soothing rainfall for deep focus",
            "20:00",
            Nature,
            "https://cdn.pixabay.com/audio/2021/08/09/audio_dc39bde808.mp3",
        ),
        track(
            6,
            "Soft Piano",
            "Gentle piano melodies for relaxation",
            "9:00",
            Music,
            "https://cdn.pixabay.com/audio/2022/01/20/audio_d3f7d48da5.mp3",
        ),
        track(
            7,
            "Light Breeze",
            "Gentle wind sounds for relaxation",
            "18:00",
            Nature,
            "https://cdn.pixabay.com/audio/2022/05/27/audio_1808fbf07a.mp3",
        ),
        track(
            8,
            "Mindful Breathing",
            "Guided breathing exercise for mindfulness",
            "5:00",
            Meditation,
            "https://cdn.pixabay.com/audio/2022/03/15/audio_db7aa74ac1.mp3",
        ),
    ]
}

impl Catalog {
    /// The catalog shipped with the player.
    pub fn builtin() -> Self {
        // Validity is covered by `builtin_catalog_passes_validation`.
        Self::from_validated(builtin_tracks())
    }
}
