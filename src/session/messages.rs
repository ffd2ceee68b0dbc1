//! User-facing texts. Plain text only; the transport decides on markup.

use crate::error::CheckError;
use crate::model::interaction::{Button, Reply};
use crate::model::query::{Field, Query, QueryDraft};
use crate::model::record::{Attribute, Record};

const NOT_AVAILABLE: &str = "N/A";

fn label(field: Field) -> &'static str {
    match field {
        Field::FirstName => "Ім'я",
        Field::LastName => "Прізвище",
        Field::Patronymic => "По батькові",
        Field::BirthDate => "Дата народження",
    }
}

fn query_lines(q: &Query, bullet: &str) -> String {
    format!(
        "{bullet} {}: {}\n{bullet} {}: {}\n{bullet} {}: {}\n{bullet} {}: {}\n",
        label(Field::FirstName),
        q.first_name,
        label(Field::LastName),
        q.last_name,
        label(Field::Patronymic),
        q.patronymic,
        label(Field::BirthDate),
        q.birth_date,
    )
}

fn draft_lines(draft: &QueryDraft) -> String {
    let fields = [
        (Field::FirstName, draft.first_name.as_deref()),
        (Field::LastName, draft.last_name.as_deref()),
        (Field::Patronymic, draft.patronymic.as_deref()),
        (Field::BirthDate, draft.birth_date.as_deref()),
    ];
    fields
        .iter()
        .filter_map(|&(f, v)| v.map(|v| format!("✅ {}: {}\n", label(f), v)))
        .collect()
}

/// Buttons offered after a search or whenever the user lands back in the menu.
pub fn menu_buttons(saved: Option<&Query>) -> &'static [Button] {
    if saved.is_some() {
        &[Button::ReuseSaved, Button::BeginNewQuery]
    } else {
        &[Button::BeginNewQuery]
    }
}

fn follow_up_buttons(saved: Option<&Query>) -> &'static [Button] {
    if saved.is_some() {
        &[Button::ReuseSaved, Button::BeginNewQuery, Button::ReturnToMenu]
    } else {
        &[Button::BeginNewQuery, Button::ReturnToMenu]
    }
}

pub fn menu(saved: Option<&Query>) -> Reply {
    let text = match saved {
        Some(q) => format!(
            "🏠 Головне меню\n\n💾 Збережені параметри:\n\n{}\nВиберіть дію:",
            query_lines(q, "•")
        ),
        None => "🏠 Головне меню\n\n\
                 Цей бот перевіряє наявність особи в базі розшукуваних осіб МВС України.\n\n\
                 Для перевірки потрібно ввести ім'я, прізвище, по батькові \
                 та дату народження (ДД.ММ.РРРР).\n\n\
                 Натисніть кнопку для початку:"
            .to_string(),
    };
    Reply::text(text).with_buttons(menu_buttons(saved))
}

pub fn prompt(field: Field, draft: &QueryDraft) -> Reply {
    let ask = match field {
        Field::FirstName => "📝 Введіть ім'я особи для перевірки:\n\nПриклад: Олександр",
        Field::LastName => "📝 Тепер введіть прізвище:\n\nПриклад: Кліновський",
        Field::Patronymic => "📝 Тепер введіть по батькові:\n\nПриклад: Олександрович",
        Field::BirthDate => {
            "📝 Тепер введіть дату народження:\n\nФормат: ДД.ММ.РРРР\nПриклад: 05.02.1991"
        }
    };
    let collected = draft_lines(draft);
    let text = if collected.is_empty() {
        format!("{ask}\n\nАбо /cancel для скасування")
    } else {
        format!("{collected}\n{ask}\n\nАбо /cancel для скасування")
    };
    Reply::text(text).with_buttons(&[Button::Cancel])
}

pub fn save_question(q: &Query) -> Reply {
    Reply::text(format!(
        "📋 Дані для перевірки:\n\n{}\n\
         💾 Зберегти ці дані для майбутніх пошуків?\n\n\
         Якщо збережете, зможете швидко перевіряти цю особу знову, не вводячи дані кожен раз.",
        query_lines(q, "✅")
    ))
    .with_buttons(&[Button::Save, Button::DontSave, Button::Cancel])
}

pub fn search_started(q: &Query, how: SearchStart) -> Reply {
    let head = match how {
        SearchStart::Saved => "💾 Дані збережено!\n\n".to_string(),
        SearchStart::NotSaved => "(Дані не збережено)\n\n".to_string(),
        SearchStart::Reused => format!(
            "📋 Пошук за збереженими параметрами:\n\n{}\n",
            query_lines(q, "✅")
        ),
    };
    Reply::text(format!(
        "{head}⏳ Завантажую дані з бази МВС... Це може зайняти деякий час."
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStart {
    Saved,
    NotSaved,
    Reused,
}

pub fn found(record: &Record, saved: Option<&Query>) -> Reply {
    let field = |attr| record.get(attr).unwrap_or(NOT_AVAILABLE);
    let mut text = format!(
        "🚨 ОСОБУ ЗНАЙДЕНО В БАЗІ РОЗШУКУВАНИХ!\n\n📋 Дані:\n\
         • {}: {}\n• {}: {}\n• {}: {}\n• {}: {}\n",
        label(Field::FirstName),
        field(Attribute::FirstName),
        label(Field::LastName),
        field(Attribute::LastName),
        label(Field::Patronymic),
        field(Attribute::Patronymic),
        label(Field::BirthDate),
        field(Attribute::BirthDate),
    );

    for (attr, name) in [
        (Attribute::Category, "Категорія"),
        (Attribute::Restraint, "Запобіжний захід"),
        (Attribute::Article, "Стаття"),
    ] {
        if let Some(v) = record.get(attr) {
            text.push_str(&format!("• {name}: {v}\n"));
        }
    }

    Reply::text(text).with_buttons(follow_up_buttons(saved))
}

pub fn not_found(q: &Query, saved: Option<&Query>) -> Reply {
    Reply::text(format!(
        "✅ Особу НЕ знайдено в базі розшукуваних\n\nПеревірено за параметрами:\n{}",
        query_lines(q, "•")
    ))
    .with_buttons(follow_up_buttons(saved))
}

pub fn failure(err: &CheckError, saved: Option<&Query>) -> Reply {
    let text = match err {
        CheckError::NoSavedParameters => {
            "❌ Немає збережених даних.\n\nНатисніть «Почати перевірку», щоб ввести нові параметри."
                .to_string()
        }
        CheckError::Fetch(_) | CheckError::Worker(_) => format!(
            "❌ Помилка при завантаженні даних:\n{err}\n\n\
             Спробуйте пізніше або перевірте з'єднання з інтернетом."
        ),
        CheckError::Decode(_) => format!(
            "❌ Помилка при обробці даних:\n{err}\n\n\
             Можливо, формат даних на сервері змінився. Спробуйте пізніше."
        ),
    };
    let buttons = if err.is_transient() {
        follow_up_buttons(saved)
    } else {
        menu_buttons(saved)
    };
    Reply::text(text).with_buttons(buttons)
}

pub fn cancelled(saved: Option<&Query>) -> Reply {
    Reply::text("❌ Перевірку скасовано.").with_buttons(menu_buttons(saved))
}

pub fn nothing_to_cancel(saved: Option<&Query>) -> Reply {
    Reply::text("Немає активної перевірки.").with_buttons(menu_buttons(saved))
}

pub fn finish_or_cancel() -> Reply {
    Reply::text("Спочатку завершіть введення даних або натисніть /cancel.")
        .with_buttons(&[Button::Cancel])
}

pub fn search_in_progress() -> Reply {
    Reply::text("⏳ Перевірка вже виконується, зачекайте на результат.")
}

pub fn busy() -> Reply {
    Reply::text("⏳ Забагато запитів. Зачекайте на відповідь і спробуйте знову.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query() -> Query {
        Query {
            first_name: "Павло".into(),
            last_name: "Осауленко".into(),
            patronymic: "Петрович".into(),
            birth_date: "05.02.1991".into(),
        }
    }

    #[test]
    fn menu_offers_reuse_only_when_saved() {
        assert_eq!(menu(None).buttons, vec![Button::BeginNewQuery]);
        let q = query();
        let m = menu(Some(&q));
        assert_eq!(m.buttons, vec![Button::ReuseSaved, Button::BeginNewQuery]);
        assert!(m.text.contains("Осауленко"));
    }

    #[test]
    fn prompt_echoes_collected_fields() {
        let mut draft = QueryDraft::default();
        draft.set(Field::FirstName, "Павло".into());
        let p = prompt(Field::LastName, &draft);
        assert!(p.text.contains("✅ Ім'я: Павло"));
        assert!(p.text.contains("прізвище"));
        assert_eq!(p.buttons, vec![Button::Cancel]);
    }

    #[test]
    fn found_lists_optional_details() {
        let record: Record = serde_json::from_value(json!({
            "FIRST_NAME_U": "Павло",
            "LAST_NAME_U": "Осауленко",
            "BIRTH_DATE": "1991-02-05T00:00:00",
            "ARTICLE_CRIM": "ст. 185 ч. 2",
        }))
        .unwrap();
        let r = found(&record, None);
        assert!(r.text.contains("По батькові: N/A"));
        assert!(r.text.contains("Стаття: ст. 185 ч. 2"));
        assert!(!r.text.contains("Категорія"));
        assert_eq!(r.buttons, vec![Button::BeginNewQuery, Button::ReturnToMenu]);
    }

    #[test]
    fn transient_failure_asks_to_retry() {
        let q = query();
        let r = failure(&CheckError::fetch("request timed out after 120s"), Some(&q));
        assert!(r.text.contains("Спробуйте пізніше"));
        assert_eq!(
            r.buttons,
            vec![Button::ReuseSaved, Button::BeginNewQuery, Button::ReturnToMenu]
        );
    }
}
