mod common;

use magazine_core::{registry_stats, reset_registries, Article, Author, Magazine, ValidationError};
use std::sync::MutexGuard;

fn fixture() -> (MutexGuard<'static, ()>, Author, Magazine) {
    let guard = common::exclusive_registry();
    let author = Author::new("Ama").unwrap();
    let magazine = Magazine::new("Vogue", "Fashion").unwrap();
    (guard, author, magazine)
}

#[test]
fn title_length_decides_construction() {
    let (_registry, author, magazine) = fixture();

    for len in 0..=60 {
        let title = "t".repeat(len);
        let result = Article::new(&author, &magazine, title.as_str());
        if (5..=50).contains(&len) {
            let article = result.unwrap();
            assert_eq!(article.title(), title);
        } else {
            assert_eq!(
                result.unwrap_err(),
                ValidationError::TitleLength { chars: len }
            );
        }
    }

    assert_eq!(registry_stats().articles, 46);
}

#[test]
fn rejected_title_does_not_register_article() {
    let (_registry, author, magazine) = fixture();
    Article::new(&author, &magazine, "Tiny").unwrap_err();
    Article::new(&author, &magazine, "x".repeat(51)).unwrap_err();

    assert!(Article::all().is_empty());
    assert!(author.articles().is_empty());
    assert!(magazine.articles().is_empty());
}

#[test]
fn article_keeps_title_and_references() {
    let (_registry, author, magazine) = fixture();
    let article = Article::new(&author, &magazine, "How to wear fashion").unwrap();

    assert_eq!(article.title(), "How to wear fashion");
    assert_eq!(article.author(), author);
    assert_eq!(article.magazine(), magazine);
    assert_eq!(Article::all(), vec![article]);
}

#[test]
fn reassigning_author_moves_article_between_views() {
    let (_registry, ama, vogue) = fixture();
    let kofi = Author::new("Kofi").unwrap();

    let first = Article::new(&ama, &vogue, "First article").unwrap();
    let second = Article::new(&ama, &vogue, "Second article").unwrap();
    let third = Article::new(&kofi, &vogue, "Third article").unwrap();

    first.set_author(&kofi).unwrap();

    assert_eq!(ama.articles(), vec![second]);
    assert_eq!(kofi.articles(), vec![first, third]);
}

#[test]
fn reassigning_magazine_moves_article_between_views() {
    let (_registry, ama, vogue) = fixture();
    let elle = Magazine::new("Elle", "Fashion").unwrap();
    let article = Article::new(&ama, &vogue, "Seasonal colours").unwrap();

    article.set_magazine(&elle).unwrap();

    assert!(vogue.articles().is_empty());
    assert_eq!(elle.articles(), vec![article]);
    assert_eq!(ama.magazines(), vec![elle]);
}

#[test]
fn reference_setters_reject_stale_handles() {
    let (_registry, ama, vogue) = fixture();
    let article = Article::new(&ama, &vogue, "Seasonal colours").unwrap();

    let stale_author = Author::new("Stale").unwrap();
    let stale_magazine = Magazine::new("Stale", "Old").unwrap();
    reset_registries();
    let kofi = Author::new("Kofi").unwrap();
    let elle = Magazine::new("Elle", "Fashion").unwrap();
    let live = Article::new(&kofi, &elle, "Winter knitwear").unwrap();

    assert_eq!(
        live.set_author(&stale_author).unwrap_err(),
        ValidationError::UnregisteredAuthor(stale_author.id())
    );
    assert_eq!(
        live.set_magazine(&stale_magazine).unwrap_err(),
        ValidationError::UnregisteredMagazine(stale_magazine.id())
    );
    assert_eq!(live.author(), kofi);
    assert_eq!(live.magazine(), elle);

    assert_eq!(
        article.set_author(&kofi).unwrap_err(),
        ValidationError::UnregisteredArticle(article.id())
    );
    assert_eq!(
        article.set_magazine(&elle).unwrap_err(),
        ValidationError::UnregisteredArticle(article.id())
    );
    assert_eq!(article.author(), ama);
    assert_eq!(article.magazine(), vogue);
    assert_eq!(kofi.articles(), vec![live]);
}

#[test]
fn queries_on_another_thread_see_the_same_registry() {
    let (_registry, ama, vogue) = fixture();
    let article = ama.add_article(&vogue, "How to wear fashion").unwrap();

    let (stats, top, authors, articles) = std::thread::spawn(move || {
        (
            registry_stats(),
            Magazine::top_publisher(),
            Author::all(),
            ama.articles(),
        )
    })
    .join()
    .unwrap();

    assert_eq!(stats.authors, 1);
    assert_eq!(stats.magazines, 1);
    assert_eq!(stats.articles, 1);
    assert_eq!(top, Some(vogue));
    assert_eq!(authors.len(), 1);
    assert_eq!(articles, vec![article]);
}

#[test]
fn entities_built_on_another_thread_are_registered() {
    let (_registry, ama, vogue) = fixture();

    let article = std::thread::spawn({
        let ama = ama.clone();
        let vogue = vogue.clone();
        move || ama.add_article(&vogue, "Written elsewhere").unwrap()
    })
    .join()
    .unwrap();

    assert_eq!(Article::all(), vec![article.clone()]);
    assert_eq!(ama.articles(), vec![article]);
    assert_eq!(vogue.contributors(), vec![ama]);
}
