use maud::{Markup, Render, html};

const NAV_LINKS: [(&str, &str, &str); 3] = [
    ("students", "/", "Students"),
    ("dashboard", "/dashboard", "Dashboard"),
    ("settings", "/settings", "Settings"),
];

pub fn render_nav(current_page: &str) -> Markup {
    html! {
        nav class="w-full bg-gray-800 shadow-md mb-8" {
            div class="max-w-5xl mx-auto flex flex-row items-center space-x-6 px-4 py-3" {
                span class="text-xl font-bold mr-4" {"Roster"}
                @for (page_id, href, label) in NAV_LINKS {
                    @if page_id == current_page {
                        a href=(href) class="font-semibold text-blue-400 underline" {(label)}
                    } @else {
                        a href=(href) class="text-gray-300 hover:text-white" {(label)}
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 class="text-xl font-semibold mb-2" {(s)}
    }
}

pub fn form_element(id: &'static str, label: &'static str, input_type: &'static str, required: bool) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            input required[required] type=(input_type) id=(id) name=(id) class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        }
    }
}

pub fn stat_card(id: &'static str, label: &'static str) -> Markup {
    html! {
        div class="bg-gray-800 rounded shadow-md p-6 flex flex-col items-center" {
            span id=(id) class="text-4xl font-bold" {"-"}
            span class="text-gray-400 mt-2" {(label)}
        }
    }
}
