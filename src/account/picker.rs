//! A small form for switching the account a page looks at.

use maud::{Markup, html};

use crate::{
    account::{Account, AccountId},
    html::{FIELD_LABEL_CLASS, TEXT_FIELD_CLASS},
};

/// Renders a GET form that reloads `action` with an `account` query
/// parameter.
///
/// Pages that show one account at a time place this above their content so
/// the user can switch between accounts.
pub fn account_picker_view(
    action: &str,
    accounts: &[Account],
    selected_account_id: AccountId,
) -> Markup {
    html! {
        form
            method="get"
            action=(action)
            class="w-full flex items-end gap-2 mb-4 md:mb-6"
        {
            div class="grow"
            {
                label
                    for="account"
                    class=(FIELD_LABEL_CLASS)
                {
                    "Account"
                }

                select
                    name="account"
                    id="account"
                    class=(TEXT_FIELD_CLASS)
                {
                    @for account in accounts {
                        option
                            value=(account.id)
                            selected[account.id == selected_account_id]
                        {
                            (account.name) " (" (account.currency) ")"
                        }
                    }
                }
            }

            button
                type="submit"
                class="px-4 py-2 bg-emerald-500 hover:bg-emerald-600 focus:ring-4
                    focus:outline-hidden focus:ring-emerald-300 rounded
                    text-white text-sm font-medium text-center"
            {
                "Switch"
            }
        }
    }
}
