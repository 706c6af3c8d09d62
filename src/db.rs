//! First-run seeding of the sample corpus.
//!
//! Seeded records go straight to approved status (trusted seeding); the
//! contribution API is the only path that creates pending records.

use std::sync::Arc;

use anyhow::Result;

use ulwazi_backend::models::{NewText, TextStatus};
use ulwazi_backend::store::{CorpusStore, TextQuery};

fn sample(
    title: &str,
    title_en: &str,
    content: &str,
    content_en: &str,
    full_content: &str,
    full_content_en: &str,
    category: &str,
    source: &str,
) -> NewText {
    NewText {
        title: title.to_string(),
        title_en: title_en.to_string(),
        content: content.to_string(),
        content_en: content_en.to_string(),
        full_content: Some(full_content.to_string()),
        full_content_en: Some(full_content_en.to_string()),
        category: category.to_string(),
        source: Some(source.to_string()),
        contributor_id: None,
    }
}

/// Insert the starter texts when the corpus is empty. Word metrics are
/// derived at insert time like any other write.
pub async fn seed_sample_texts(store: &Arc<dyn CorpusStore>) -> Result<()> {
    let existing = store.count(&TextQuery::default()).await?;
    if existing > 0 {
        return Ok(());
    }

    tracing::info!("Empty corpus, seeding sample texts");

    let samples = [
        sample(
            "Indlela ibuzwa kwabaphambili",
            "A path is asked from those who have walked it before",
            "Isaga elikhuthaza ukulalela abanolwazi.",
            "A proverb that encourages listening to those with knowledge.",
            "Indlela ibuzwa kwabaphambili. Leli isaga likhombisa ukubaluleka kokulalela abantu abanolwazi.",
            "A path is asked from those who have walked it before. This proverb shows the importance of listening to knowledgeable people.",
            "izaga",
            "Traditional isiZulu wisdom",
        ),
        sample(
            "Umuntu ngumuntu ngabantu",
            "A person is a person through other people",
            "Isaga elichaza ukubaluleka kobuntu.",
            "A proverb that explains the importance of humanity.",
            "Umuntu ngumuntu ngabantu. Leli isaga ligcizelela ukuxhumana kwabantu.",
            "A person is a person through other people. This proverb emphasizes human interconnectedness.",
            "izaga",
            "Traditional isiZulu philosophy",
        ),
        sample(
            "Izibongo zikaShaka",
            "Praise Poetry of Shaka",
            "Ubulawu obungelanga bulawu! Wen' owadl' amanye amadoda.",
            "The magic that was not magic! You who devoured other men.",
            "Izibongo zenkosi uShaka kaSenzangakhona. Ubulawu obungelanga bulawu! Wen' owadl' amanye amadoda.",
            "Praise poetry of King Shaka kaSenzangakhona. The magic that was not magic! You who devoured other men.",
            "izibongo",
            "Historical Zulu oral tradition",
        ),
        sample(
            "Isisho sokuthi ukuhamba kukufunda",
            "The saying that traveling is learning",
            "Lesi isisho sikhomba ukubaluleka kokuhamba nokufunda.",
            "This saying shows the importance of traveling and learning.",
            "Isisho sokuthi ukuhamba kukufunda. Lesi isisho sikhombisa ukuthi ukuhamba kuyindlela yokufunda.",
            "The saying that traveling is learning. This saying shows that traveling is a way of learning.",
            "izisho",
            "Traditional wisdom",
        ),
        sample(
            "Ubuntu botho",
            "Humanity philosophy",
            "Umqondo wobuntu owawuthandwa ngabantu basendulo.",
            "The concept of humanity that was loved by ancient people.",
            "Ubuntu botho. Umqondo wobuntu owawuthandwa ngabantu basendulo.",
            "Humanity philosophy. The concept of humanity that was loved by ancient people.",
            "philosophy",
            "Traditional philosophy",
        ),
    ];

    for text in &samples {
        store.insert(text, TextStatus::Approved).await?;
    }

    tracing::info!("Seeded {} sample texts", samples.len());
    Ok(())
}
