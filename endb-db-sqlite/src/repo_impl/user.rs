use num_traits::{FromPrimitive as _, ToPrimitive as _};

use super::*;

impl<'a> UserRepo for DbReadOnly<'a> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }

    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbReadWrite<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }

    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User> {
        get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn count_users(&self) -> Result<usize> {
        count_users(&mut self.conn.borrow_mut())
    }
}

impl<'a> From<&'a User> for models::NewUser<'a> {
    fn from(from: &'a User) -> Self {
        let User {
            email,
            email_confirmed,
            password,
            role,
            plan,
        } = from;
        Self {
            email: email.as_str(),
            email_confirmed: *email_confirmed,
            password: password.as_ref(),
            role: role.to_i16().expect("User role primitive"),
            plan: plan.to_i16().expect("Subscription plan primitive"),
        }
    }
}

fn load_user(entity: models::UserEntity) -> Result<User> {
    let models::UserEntity {
        email,
        email_confirmed,
        password,
        role,
        plan,
    } = entity;
    let role =
        Role::from_i16(role).ok_or_else(|| anyhow!("Invalid user role: {role}"))?;
    let plan = SubscriptionPlan::from_i16(plan)
        .ok_or_else(|| anyhow!("Invalid subscription plan: {plan}"))?;
    Ok(User {
        email: EmailAddress::new_unchecked(email),
        email_confirmed,
        password: password.into(),
        role,
        plan,
    })
}

fn create_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    let new_user = models::NewUser::from(user);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<()> {
    use schema::users::dsl;
    let new_user = models::NewUser::from(user);
    diesel::update(dsl::users.filter(dsl::email.eq(new_user.email)))
        .set(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_user_by_email(conn: &mut SqliteConnection, email: &EmailAddress) -> Result<User> {
    use schema::users::dsl;
    let entity = dsl::users
        .filter(dsl::email.eq(email.as_str()))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?;
    load_user(entity)
}

fn try_get_user_by_email(
    conn: &mut SqliteConnection,
    email: &EmailAddress,
) -> Result<Option<User>> {
    use schema::users::dsl;
    dsl::users
        .filter(dsl::email.eq(email.as_str()))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_user)
        .transpose()
}

fn count_users(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::users::dsl;
    Ok(dsl::users
        .select(diesel::dsl::count(dsl::email))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
