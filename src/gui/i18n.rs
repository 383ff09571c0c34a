//! UI strings
//!
//! English and Japanese labels for the launcher window.

use browser_profile_launcher::config::{BehaviorAfterLaunch, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    All,
    History,
    KeywordSearch,
    AddCollection,
    CollectionName,
    DeleteCollection,
    Collections,
    Add,
    Cancel,
    Save,
    Settings,
    Language,
    BehaviorAfterLaunch,
    NoProfiles,
    OpenFolder,
    Refresh,
}

/// Translate a label
pub fn tr(lang: Language, text: Text) -> &'static str {
    let (en, ja) = match text {
        Text::All => ("All", "すべて"),
        Text::History => ("History", "履歴"),
        Text::KeywordSearch => ("Search profiles", "キーワード検索"),
        Text::AddCollection => ("New collection", "コレクションを追加"),
        Text::CollectionName => ("Name", "名前"),
        Text::DeleteCollection => ("Delete this collection", "このコレクションを削除"),
        Text::Collections => ("Collections", "コレクション"),
        Text::Add => ("Add", "追加"),
        Text::Cancel => ("Cancel", "キャンセル"),
        Text::Save => ("Save", "保存"),
        Text::Settings => ("Settings", "設定"),
        Text::Language => ("Language", "言語"),
        Text::BehaviorAfterLaunch => ("After launch", "起動後の動作"),
        Text::NoProfiles => ("No profiles", "プロファイルがありません"),
        Text::OpenFolder => ("Open profile folder", "プロファイルフォルダを開く"),
        Text::Refresh => ("Reload profiles", "プロファイルを再読み込み"),
    };

    match lang {
        Language::En => en,
        Language::Ja => ja,
    }
}

pub fn behavior_label(lang: Language, behavior: BehaviorAfterLaunch) -> &'static str {
    match (lang, behavior) {
        (Language::En, BehaviorAfterLaunch::None) => "Do nothing",
        (Language::En, BehaviorAfterLaunch::Minimize) => "Minimize window",
        (Language::En, BehaviorAfterLaunch::Close) => "Close launcher",
        (Language::Ja, BehaviorAfterLaunch::None) => "何もしない",
        (Language::Ja, BehaviorAfterLaunch::Minimize) => "最小化する",
        (Language::Ja, BehaviorAfterLaunch::Close) => "終了する",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_differ() {
        assert_eq!(tr(Language::En, Text::History), "History");
        assert_eq!(tr(Language::Ja, Text::History), "履歴");
        assert_ne!(
            behavior_label(Language::En, BehaviorAfterLaunch::Close),
            behavior_label(Language::Ja, BehaviorAfterLaunch::Close)
        );
    }
}
