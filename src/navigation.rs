//! The navigation bar shared by every page.

use maud::{Markup, html};

use crate::endpoints;

/// The navigation targets in display order, as (endpoint, label) pairs.
const NAV_ITEMS: [(&str, &str); 5] = [
    (endpoints::DASHBOARD_VIEW, "Dashboard"),
    (endpoints::TRANSACTIONS_VIEW, "Transactions"),
    (endpoints::ACCOUNTS_VIEW, "Accounts"),
    (endpoints::CATEGORIES_VIEW, "Categories"),
    (endpoints::BUDGETS_VIEW, "Budgets"),
];

struct NavLink {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

/// The site navigation: a top bar on large screens and a fixed bottom bar on
/// small ones.
pub struct NavBar {
    links: Vec<NavLink>,
}

impl NavBar {
    /// Build the navigation bar, marking the link that matches
    /// `active_endpoint` as the current page.
    pub fn new(active_endpoint: &str) -> Self {
        let links = NAV_ITEMS
            .iter()
            .map(|&(url, title)| NavLink {
                url,
                title,
                is_current: url == active_endpoint,
            })
            .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            (desktop_nav(&self.links))
            (mobile_nav(&self.links))
        )
    }
}

fn desktop_nav(links: &[NavLink]) -> Markup {
    // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
    html!(
        nav class="bg-white border-gray-200 dark:bg-gray-900"
        {
            div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
            {
                a href="/" class="flex items-center space-x-3 rtl:space-x-reverse"
                {
                    span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "BiYú"
                    }
                }

                div class="hidden w-full lg:block lg:w-auto"
                {
                    ul
                        class="font-medium flex flex-col p-4 lg:p-0 mt-4
                        border border-gray-100 rounded bg-gray-50
                        lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                        lg:border-0 lg:bg-white dark:bg-gray-800
                        lg:dark:bg-gray-900 dark:border-gray-700"
                    {
                        @for link in links {
                            li {
                                a href=(link.url) class=(desktop_link_style(link.is_current)) {
                                    (link.title)
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn desktop_link_style(is_current: bool) -> &'static str {
    if is_current {
        "block py-2 px-3 text-white bg-emerald-700 rounded-sm lg:bg-transparent \
        lg:text-emerald-700 lg:p-0 dark:text-white lg:dark:text-emerald-500"
    } else {
        "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100 \
        lg:hover:bg-transparent lg:border-0 lg:hover:text-emerald-700 lg:p-0 \
        dark:text-white lg:dark:hover:text-emerald-500 dark:hover:bg-gray-700 \
        dark:hover:text-white lg:dark:hover:bg-transparent"
    }
}

// All five links fit a bottom bar, so there is no overflow menu.
fn mobile_nav(links: &[NavLink]) -> Markup {
    html!(
        nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden"
        {
            div class="mx-auto max-w-screen-xl px-4 pb-4"
            {
                ul
                    class="grid grid-cols-5 gap-1 rounded-xl border border-gray-200
                    bg-white/95 px-2 py-3 text-xs font-semibold text-gray-600
                    shadow-lg backdrop-blur dark:border-gray-700
                    dark:bg-gray-900/95 dark:text-gray-300"
                    aria-label="Primary"
                {
                    @for link in links {
                        li class="min-w-0" {
                            a
                                href=(link.url)
                                class=(mobile_link_style(link.is_current))
                                aria-current=[link.is_current.then_some("page")]
                            {
                                span class="truncate" { (link.title) }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn mobile_link_style(is_current: bool) -> &'static str {
    if is_current {
        "flex w-full min-w-0 items-center justify-center rounded-lg bg-emerald-50 \
        px-1.5 py-2 leading-tight text-emerald-700 shadow-sm \
        dark:bg-emerald-900/30 dark:text-emerald-200"
    } else {
        "flex w-full min-w-0 items-center justify-center rounded-lg px-1.5 py-2 \
        leading-tight hover:bg-emerald-50/70 hover:text-emerald-700 \
        dark:hover:bg-emerald-900/20 dark:hover:text-emerald-200"
    }
}
