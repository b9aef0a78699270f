use std::fmt::Write;

use tahfeez_application::{DashboardState, HomeContent, ListView, Slice};
use tahfeez_core::Locale;
use tahfeez_domain::{PaginationControls, Resource, SalaryCalculation};

const LOADING: (&str, &str) = ("جاري التحميل...", "Loading...");
const EMPTY_FILTERED: (&str, &str) = (
    "لا توجد نتائج مطابقة لخيارات البحث",
    "No results match the current filters",
);
const EMPTY_UNFILTERED: (&str, &str) = ("لا توجد بيانات بعد", "Nothing has been added yet");

fn pick(text: (&'static str, &'static str), locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => text.0,
        Locale::En => text.1,
    }
}

pub fn empty_state(filtered: bool, locale: Locale) -> &'static str {
    if filtered {
        pick(EMPTY_FILTERED, locale)
    } else {
        pick(EMPTY_UNFILTERED, locale)
    }
}

pub fn table<R: Resource>(items: &[R], locale: Locale) -> String {
    let header = match locale {
        Locale::Ar => ("#", "الاسم"),
        Locale::En => ("#", "Name"),
    };
    let rows: Vec<(String, String)> = items
        .iter()
        .map(|item| (item.id().to_string(), item.display_name(locale)))
        .collect();
    let id_width = rows
        .iter()
        .map(|(id, _)| id.chars().count())
        .chain(std::iter::once(header.0.chars().count()))
        .max()
        .unwrap_or(1);

    let mut output = String::new();
    let _ = writeln!(output, "{:<id_width$}  {}", header.0, header.1);
    let _ = writeln!(output, "{}", "-".repeat(id_width + 2 + header.1.chars().count().max(4)));
    for (id, name) in rows {
        let _ = writeln!(output, "{id:<id_width$}  {name}");
    }
    output
}

pub fn pagination_hint(controls: PaginationControls, locale: Locale) -> Option<String> {
    if !controls.visible {
        return None;
    }

    let mut hint = match locale {
        Locale::Ar => format!(
            "الصفحة {} من {}",
            controls.current_page, controls.total_pages
        ),
        Locale::En => format!(
            "Page {} of {}",
            controls.current_page, controls.total_pages
        ),
    };
    if controls.previous_enabled {
        let _ = write!(hint, "  [--page {}]", controls.current_page - 1);
    }
    if controls.next_enabled {
        let _ = write!(hint, "  [--page {}]", controls.current_page + 1);
    }
    Some(hint)
}

pub fn list_view<R: Resource>(
    view: ListView<'_, R>,
    controls: PaginationControls,
    locale: Locale,
) -> String {
    match view {
        ListView::Loading => format!("{}\n", pick(LOADING, locale)),
        ListView::Empty { filtered } => format!("{}\n", empty_state(filtered, locale)),
        ListView::Items(items) => {
            let mut output = table(items, locale);
            if let Some(hint) = pagination_hint(controls, locale) {
                let _ = writeln!(output, "\n{hint}");
            }
            output
        }
    }
}

fn slice_section<T>(
    output: &mut String,
    title: &str,
    slice: &Slice<T>,
    locale: Locale,
    body: impl FnOnce(&T) -> String,
) {
    let _ = writeln!(output, "== {title}");
    match (&slice.data, &slice.error) {
        (_, Some(error)) => {
            let _ = writeln!(output, "! {error}");
        }
        (Some(data), None) => output.push_str(&body(data)),
        (None, None) => {
            let _ = writeln!(output, "{}", pick(LOADING, locale));
        }
    }
}

fn records<R: Resource>(items: &[R], locale: Locale) -> String {
    if items.is_empty() {
        format!("{}\n", empty_state(false, locale))
    } else {
        table(items, locale)
    }
}

pub fn dashboard(state: &DashboardState, locale: Locale) -> String {
    let titles = match locale {
        Locale::Ar => [
            "الإحصائيات",
            "أحدث الطلاب",
            "إيصالات بانتظار المراجعة",
            "شكاوى مفتوحة",
            "طلبات تغيير الموعد",
        ],
        Locale::En => [
            "Statistics",
            "Recent students",
            "Receipts awaiting review",
            "Open complaints",
            "Schedule change requests",
        ],
    };

    let mut output = String::new();
    slice_section(&mut output, titles[0], &state.stats, locale, |stats| {
        let labels = match locale {
            Locale::Ar => [
                "الطلاب",
                "المعلمون",
                "الاشتراكات النشطة",
                "بانتظار الإجراء",
                "إيرادات الشهر",
            ],
            Locale::En => [
                "Students",
                "Teachers",
                "Active subscriptions",
                "Awaiting action",
                "Monthly revenue",
            ],
        };
        format!(
            "{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {:.2}\n",
            labels[0],
            stats.total_students,
            labels[1],
            stats.total_teachers,
            labels[2],
            stats.active_subscriptions,
            labels[3],
            stats.pending_total(),
            labels[4],
            stats.monthly_revenue
        )
    });
    slice_section(&mut output, titles[1], &state.recent_students, locale, |items| {
        records(items, locale)
    });
    slice_section(&mut output, titles[2], &state.pending_receipts, locale, |items| {
        records(items, locale)
    });
    slice_section(
        &mut output,
        titles[3],
        &state.pending_complaints,
        locale,
        |items| records(items, locale),
    );
    slice_section(
        &mut output,
        titles[4],
        &state.pending_schedule_requests,
        locale,
        |items| records(items, locale),
    );
    output
}

pub fn home(content: &HomeContent, locale: Locale) -> String {
    let titles = match locale {
        Locale::Ar => ["الباقات", "المميزات", "دروس نموذجية", "آراء أولياء الأمور"],
        Locale::En => ["Packages", "Features", "Sample lessons", "Testimonials"],
    };

    let mut output = String::new();
    slice_section(&mut output, titles[0], &content.packages, locale, |items| {
        records(items, locale)
    });
    slice_section(&mut output, titles[1], &content.features, locale, |items| {
        records(items, locale)
    });
    slice_section(&mut output, titles[2], &content.lessons, locale, |items| {
        records(items, locale)
    });
    slice_section(&mut output, titles[3], &content.testimonials, locale, |items| {
        records(items, locale)
    });
    output
}

pub fn salary(salary: &SalaryCalculation, locale: Locale) -> String {
    let labels = match locale {
        Locale::Ar => ["الراتب", "الحصص", "الساعات", "المكافأة", "الخصومات", "الإجمالي", "الحالة"],
        Locale::En => ["Salary", "Sessions", "Hours", "Bonus", "Deductions", "Total", "Status"],
    };
    format!(
        "{} #{} ({})\n{}: {}\n{}: {:.2}\n{}: {:.2}\n{}: {:.2}\n{}: {:.2}\n{}: {}\n",
        labels[0],
        salary.id,
        salary.display_name(locale),
        labels[1],
        salary.total_sessions,
        labels[2],
        salary.total_hours,
        labels[3],
        salary.bonus,
        labels[4],
        salary.deductions,
        labels[5],
        salary.total_amount,
        labels[6],
        salary.status.label(locale)
    )
}

#[cfg(test)]
mod tests {
    use tahfeez_application::ListView;
    use tahfeez_core::Locale;
    use tahfeez_domain::{Pagination, PaginationControls, Student};

    use super::{empty_state, list_view, pagination_hint};

    #[test]
    fn empty_state_distinguishes_filtered_lists() {
        assert_ne!(
            empty_state(true, Locale::Ar),
            empty_state(false, Locale::Ar)
        );
        assert_eq!(empty_state(false, Locale::En), "Nothing has been added yet");
    }

    #[test]
    fn single_page_has_no_hint() {
        assert_eq!(pagination_hint(PaginationControls::hidden(), Locale::Ar), None);
    }

    #[test]
    fn first_of_three_pages_offers_only_next() {
        let controls = Pagination {
            total: 30,
            per_page: 10,
            current_page: 1,
            total_pages: 3,
        }
        .controls();

        assert_eq!(
            pagination_hint(controls, Locale::En).as_deref(),
            Some("Page 1 of 3  [--page 2]")
        );
    }

    #[test]
    fn loading_view_hides_table_and_empty_state() {
        let rendered = list_view::<Student>(
            ListView::Loading,
            PaginationControls::hidden(),
            Locale::En,
        );

        assert_eq!(rendered, "Loading...\n");
    }
}
